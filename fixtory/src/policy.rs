//! The value policy: maps a declared field type to a concrete value.
//!
//! Fixed mode produces exactly the zero value of each supported type, the
//! same value an uninitialized field of that type would hold. Randomized
//! mode draws from the factory's random source within the declared range.

use rand::Rng;

use crate::config::FactoryConfig;
use crate::descriptor::{FieldValue, TypeTag};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Produce a value for a field of the given declared type.
///
/// Returns `None` for [`TypeTag::Unsupported`]; such fields are left
/// untouched by the population pass. [`TypeTag::Any`] has no randomized
/// variant, both modes yield a fresh empty payload.
pub fn value_for(
    tag: TypeTag,
    randomize: bool,
    rng: &mut dyn rand::RngCore,
    config: &FactoryConfig,
) -> Option<FieldValue> {
    let value = match tag {
        TypeTag::Str if randomize => FieldValue::Str(alphabetic(rng, config.string_len)),
        TypeTag::Str => FieldValue::Str(String::new()),
        TypeTag::Any => FieldValue::Any(Box::new(())),
        TypeTag::Bool if randomize => FieldValue::Bool(rng.r#gen()),
        TypeTag::Bool => FieldValue::Bool(false),
        TypeTag::Byte if randomize => FieldValue::Byte(rng.r#gen()),
        TypeTag::Byte => FieldValue::Byte(0),
        TypeTag::Char if randomize => FieldValue::Char(rng.r#gen()),
        TypeTag::Char => FieldValue::Char('\u{0}'),
        TypeTag::Short if randomize => FieldValue::Short(rng.gen_range(0..=i16::MAX)),
        TypeTag::Short => FieldValue::Short(0),
        TypeTag::Int if randomize => FieldValue::Int(rng.r#gen()),
        TypeTag::Int => FieldValue::Int(0),
        TypeTag::Long if randomize => FieldValue::Long(rng.r#gen()),
        TypeTag::Long => FieldValue::Long(0),
        TypeTag::Float if randomize => FieldValue::Float(rng.r#gen()),
        TypeTag::Float => FieldValue::Float(0.0),
        TypeTag::Double if randomize => FieldValue::Double(rng.r#gen()),
        TypeTag::Double => FieldValue::Double(0.0),
        TypeTag::Unsupported => return None,
    };
    Some(value)
}

/// Random printable alphabetic string of the configured length.
fn alphabetic(rng: &mut dyn rand::RngCore, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
