//! Factory configuration.

/// Configuration consumed once, when a factory is created.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryConfig {
    /// Seed for the factory-owned random source. Entropy-seeded when `None`.
    pub seed: Option<u64>,
    /// Length of randomized string values.
    pub string_len: usize,
    /// Emit a per-field trace on stderr during population.
    pub verbose: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            seed: None,
            string_len: 10,
            verbose: false,
        }
    }
}
