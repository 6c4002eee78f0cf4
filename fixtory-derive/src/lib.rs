//! Derive macro for the fixtory test-fixture factory
//!
//! This crate provides the `#[derive(Fixture)]` macro, which generates the
//! per-type descriptor the factory engine consumes: constructor-shape
//! classification, field enumeration, and field assignment.

use proc_macro::TokenStream;

mod derive;

/// Derive macro implementing the `Fixture` capability trait.
///
/// The generated impl reports how the type can be constructed, enumerates
/// its declared fields with their type tags, and assigns policy-produced
/// values to them. Because the impl lives on the type itself, private
/// fields are assignable without any runtime visibility bypass.
///
/// # Basic Usage
///
/// ```rust
/// use fixtory::Fixture;
///
/// #[derive(Fixture)]
/// struct User {
///     id: i32,
///     name: String,
///     active: bool,
/// }
/// ```
///
/// # Supported field types
///
/// `String`, `bool`, `u8`, `char`, `i16`, `i32`, `i64`, `f32`, `f64`, the
/// `fixtory::AnyValue` payload, and `Option` of any of these (populated
/// identically to the bare type, wrapped in `Some`). Fields of any other
/// type are reported as unsupported and left untouched by population.
///
/// # Attributes
///
/// ```rust
/// use fixtory::Fixture;
///
/// #[derive(Fixture)]
/// struct Account {
///     balance: i64,
/// }
///
/// #[derive(Fixture)]
/// struct Statement {
///     // Owner reference of a nested type: set during construction by
///     // building the owner first, excluded from field enumeration.
///     #[fixture(owner)]
///     account: Account,
///     period: String,
///     // Left untouched even though the type is supported.
///     #[fixture(skip)]
///     checksum: String,
/// }
/// ```
///
/// A type whose only real constructor takes arguments declares that it has
/// no zero-argument construction path; `build()` on such a target fails,
/// but an injected instance can still be populated:
///
/// ```rust
/// use fixtory::Fixture;
///
/// #[derive(Fixture)]
/// #[fixture(no_default)]
/// struct Sealed {
///     token: String,
/// }
/// ```
///
/// # Limitations
///
/// Enums, unions, tuple structs, and generic targets are rejected with a
/// compile error; the engine is scoped to flat data-holder types.
#[proc_macro_derive(Fixture, attributes(fixture))]
pub fn derive_fixture(input: TokenStream) -> TokenStream {
    derive::derive_fixture_impl(input)
}
