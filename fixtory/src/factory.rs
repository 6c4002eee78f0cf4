//! The factory: per-target state, instance building, and re-fill semantics.

use rand::rngs::StdRng;

use crate::config::FactoryConfig;
use crate::descriptor::{Constructibility, Fixture};
use crate::error::ConstructionError;
use crate::populate::populate;
use crate::rng::{create_rng, create_seeded_rng};

/// Stateful fixture factory scoped to exactly one target type.
///
/// The factory owns its random source, seeded once at creation, so
/// successive [`build`](Factory::build) calls draw from a continuing
/// sequence rather than a re-seeded one. Once a build succeeds (or an
/// instance is injected) the factory never constructs again: later builds
/// re-run field population over the stored instance.
///
/// A factory is not designed for concurrent use; callers needing parallel
/// fixture generation create one factory per target type per worker.
#[derive(Debug)]
pub struct Factory<T: Fixture> {
    config: FactoryConfig,
    rng: StdRng,
    randomize: bool,
    built: Option<T>,
}

impl<T: Fixture> Factory<T> {
    /// Create a factory with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_config(FactoryConfig::default())
    }

    /// Create a factory whose random source is seeded, for reproducible
    /// randomized fixtures.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(FactoryConfig {
            seed: Some(seed),
            ..FactoryConfig::default()
        })
    }

    /// Create a factory from an explicit configuration.
    pub fn with_config(config: FactoryConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => create_seeded_rng(seed),
            None => create_rng(),
        };
        Self {
            config,
            rng,
            randomize: false,
            built: None,
        }
    }

    /// Switch all subsequent population passes to randomized values.
    /// One-way and idempotent.
    pub fn randomize(&mut self) {
        self.randomize = true;
    }

    /// Whether randomized values are enabled.
    pub fn is_randomized(&self) -> bool {
        self.randomize
    }

    /// Store a caller-supplied instance to populate instead of constructing
    /// one. Called after a build has already happened, it silently replaces
    /// the stored instance for the next population pass.
    pub fn inject(&mut self, instance: T) {
        self.built = Some(instance);
    }

    /// Build (or re-fill) the target instance.
    ///
    /// Construction happens at most once per factory: once an instance is
    /// stored, `build` only re-runs field population over it. Construction
    /// and assignment failures surface here; a partially populated instance
    /// is never returned and is not retained.
    pub fn build(&mut self) -> Result<&mut T, ConstructionError> {
        let mut instance = match self.built.take() {
            Some(existing) => existing,
            None => Self::construct()?,
        };
        populate(&mut instance, self.randomize, &mut self.rng, &self.config)?;
        Ok(self.built.insert(instance))
    }

    /// Move the stored instance out of the factory. The next
    /// [`build`](Factory::build) constructs from scratch.
    pub fn take(&mut self) -> Option<T> {
        self.built.take()
    }

    /// The currently stored instance, if any.
    pub fn built(&self) -> Option<&T> {
        self.built.as_ref()
    }

    fn construct() -> Result<T, ConstructionError> {
        match T::constructibility() {
            Constructibility::Direct(construct) => construct(),
            Constructibility::NestedNeedsEnclosing { construct, .. } => construct(),
            Constructibility::NotConstructible => Err(ConstructionError::missing_default(T::NAME)),
        }
    }
}

impl<T: Fixture> Default for Factory<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, FieldValue, TypeTag};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Hand-written impl of what the derive macro generates; generated code
    // names the crate by its external path, which does not resolve here.
    #[derive(Debug, Default)]
    struct Sample {
        name: String,
        count: i32,
        ratio: f64,
        items: Vec<u8>,
    }

    impl Fixture for Sample {
        const NAME: &'static str = "Sample";

        fn constructibility() -> Constructibility<Self> {
            Constructibility::Direct(|| Ok(Sample::default()))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor {
                    name: "name",
                    tag: TypeTag::Str,
                },
                FieldDescriptor {
                    name: "count",
                    tag: TypeTag::Int,
                },
                FieldDescriptor {
                    name: "ratio",
                    tag: TypeTag::Double,
                },
                FieldDescriptor {
                    name: "items",
                    tag: TypeTag::Unsupported,
                },
            ];
            FIELDS
        }

        fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), ConstructionError> {
            match (field, value) {
                ("name", FieldValue::Str(v)) => {
                    self.name = v;
                    Ok(())
                }
                ("count", FieldValue::Int(v)) => {
                    self.count = v;
                    Ok(())
                }
                ("ratio", FieldValue::Double(v)) => {
                    self.ratio = v;
                    Ok(())
                }
                (field, value) => Err(ConstructionError::field_assignment(
                    Self::NAME,
                    field,
                    format!("no writable field accepts a {:?} value", value.tag()),
                )),
            }
        }
    }

    #[derive(Debug)]
    struct ArgsOnly {
        label: String,
    }

    impl Fixture for ArgsOnly {
        const NAME: &'static str = "ArgsOnly";

        fn constructibility() -> Constructibility<Self> {
            Constructibility::NotConstructible
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
                name: "label",
                tag: TypeTag::Str,
            }];
            FIELDS
        }

        fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), ConstructionError> {
            match (field, value) {
                ("label", FieldValue::Str(v)) => {
                    self.label = v;
                    Ok(())
                }
                (field, value) => Err(ConstructionError::field_assignment(
                    Self::NAME,
                    field,
                    format!("no writable field accepts a {:?} value", value.tag()),
                )),
            }
        }
    }

    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    struct Counted {
        n: i32,
    }

    impl Fixture for Counted {
        const NAME: &'static str = "Counted";

        fn constructibility() -> Constructibility<Self> {
            Constructibility::Direct(|| {
                CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
                Ok(Counted { n: 0 })
            })
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
                name: "n",
                tag: TypeTag::Int,
            }];
            FIELDS
        }

        fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), ConstructionError> {
            match (field, value) {
                ("n", FieldValue::Int(v)) => {
                    self.n = v;
                    Ok(())
                }
                (field, value) => Err(ConstructionError::field_assignment(
                    Self::NAME,
                    field,
                    format!("no writable field accepts a {:?} value", value.tag()),
                )),
            }
        }
    }

    #[test]
    fn build_fills_supported_fields_with_zero_values() {
        let mut factory = Factory::<Sample>::with_seed(1);
        let sample = factory.build().unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
        assert_eq!(sample.ratio, 0.0);
        assert!(sample.items.is_empty());
    }

    #[test]
    fn repeated_builds_reuse_the_same_slot() {
        let mut factory = Factory::<Sample>::with_seed(1);
        let first = factory.build().unwrap() as *const Sample;
        let second = factory.build().unwrap() as *const Sample;
        assert_eq!(first, second);
    }

    #[test]
    fn construction_happens_once_across_builds() {
        let mut factory = Factory::<Counted>::with_seed(1);
        factory.build().unwrap();
        factory.build().unwrap();
        factory.build().unwrap();
        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn randomize_is_one_way_and_affects_later_passes() {
        let mut factory = Factory::<Sample>::with_seed(7);
        assert!(!factory.is_randomized());

        let fixed_name = factory.build().unwrap().name.clone();
        assert_eq!(fixed_name, "");

        factory.randomize();
        factory.randomize(); // idempotent
        assert!(factory.is_randomized());

        let random_name = factory.build().unwrap().name.clone();
        assert_eq!(random_name.len(), 10);
    }

    #[test]
    fn injected_instance_is_populated_not_replaced() {
        let mut factory = Factory::<Sample>::with_seed(1);
        let instance = Sample {
            name: "stale".to_string(),
            count: -3,
            ratio: 8.25,
            items: vec![42],
        };
        factory.inject(instance);

        let sample = factory.build().unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
        // Unsupported marker proves the injected instance survived.
        assert_eq!(sample.items, vec![42]);
    }

    #[test]
    fn not_constructible_target_fails_with_no_partial_instance() {
        let mut factory = Factory::<ArgsOnly>::new();
        let err = factory.build().unwrap_err();
        assert!(err.to_string().contains("without default constructor"));
        assert!(factory.built().is_none());
    }

    #[test]
    fn injection_bypasses_construction_for_not_constructible_targets() {
        let mut factory = Factory::<ArgsOnly>::new();
        factory.inject(ArgsOnly {
            label: "given".to_string(),
        });
        let built = factory.build().unwrap();
        assert_eq!(built.label, "");
    }

    #[test]
    fn take_empties_the_factory() {
        let mut factory = Factory::<Sample>::with_seed(1);
        factory.build().unwrap();
        let taken = factory.take();
        assert!(taken.is_some());
        assert!(factory.built().is_none());
    }

    #[test]
    fn seeded_factories_produce_identical_randomized_values() {
        let mut factory1 = Factory::<Sample>::with_seed(99);
        let mut factory2 = Factory::<Sample>::with_seed(99);
        factory1.randomize();
        factory2.randomize();

        let name1 = factory1.build().unwrap().name.clone();
        let name2 = factory2.build().unwrap().name.clone();
        assert_eq!(name1, name2);
    }

    #[test]
    fn random_sequence_continues_across_builds() {
        let mut factory = Factory::<Sample>::with_seed(5);
        factory.randomize();
        let first = factory.build().unwrap().name.clone();
        let second = factory.build().unwrap().name.clone();
        assert_ne!(first, second);
    }
}
