//! # Fixtory - Test Fixtures Without Per-Type Setup
//!
//! Fixtory builds populated instances of arbitrary data-holder types for
//! unit tests: either with deterministic zero values (the default) or with
//! randomized in-range values, to catch accidental field-order or equality
//! bugs. Type introspection happens at compile time through the
//! `#[derive(Fixture)]` macro, which generates a per-type descriptor
//! instead of relying on runtime reflection.
//!
//! ## Quick Start
//!
//! ```rust
//! use fixtory::{Factory, Fixture};
//!
//! #[derive(Fixture)]
//! struct User {
//!     name: String,
//!     age: i32,
//!     active: bool,
//! }
//!
//! let mut factory = Factory::<User>::new();
//! let user = factory.build().unwrap();
//! assert_eq!(user.name, "");
//! assert_eq!(user.age, 0);
//! assert!(!user.active);
//! ```
//!
//! Enable randomized values with [`Factory::randomize`]; the switch is
//! one-way and the factory's random source is seeded once, so repeated
//! builds draw from a continuing sequence:
//!
//! ```rust
//! use fixtory::{Factory, Fixture};
//!
//! #[derive(Fixture)]
//! struct Tagged {
//!     label: String,
//! }
//!
//! let mut factory = Factory::<Tagged>::with_seed(42);
//! factory.randomize();
//! let tagged = factory.build().unwrap();
//! assert_eq!(tagged.label.len(), 10);
//! ```

// Public modules
pub mod config;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod policy;
pub mod populate;
pub mod rng;

// Re-export the main public API
pub use config::FactoryConfig;
pub use descriptor::{AnyValue, Constructibility, FieldDescriptor, FieldValue, Fixture, TypeTag};
pub use error::ConstructionError;
pub use factory::Factory;
pub use policy::value_for;
pub use populate::populate;
pub use rng::{DefaultRngProvider, RngProvider, create_rng, create_seeded_rng};

/// Create a factory for the given target type.
pub fn factory<T: Fixture>() -> Factory<T> {
    Factory::new()
}

// Re-export derive macro from separate crate when derive feature is enabled
#[cfg(feature = "derive")]
pub use fixtory_derive::Fixture;
