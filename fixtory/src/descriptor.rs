//! Target-type descriptors and the capability trait implemented per fixture type.
//!
//! What a reflective host environment discovers at runtime is modeled here as
//! explicit, statically checked capability objects: each target type reports
//! its constructor shape, enumerates its declared fields, and assigns
//! policy-produced values to them. `#[derive(Fixture)]` generates the impl.

use std::any::Any;
use std::fmt;

use crate::error::ConstructionError;

/// Payload for "object/any" fields. A fresh empty value is `Box::new(())`.
pub type AnyValue = Box<dyn Any>;

/// Declared type of a field, as reported by its descriptor.
///
/// Anything outside this set (containers, nested non-primitive types) is
/// [`TypeTag::Unsupported`] and is left untouched during population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `String`
    Str,
    /// [`AnyValue`], an opaque boxed payload
    Any,
    /// `bool`
    Bool,
    /// `u8`
    Byte,
    /// `char`
    Char,
    /// `i16`
    Short,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// Any other declared type; never populated
    Unsupported,
}

/// Name and declared type of a single field on a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub tag: TypeTag,
}

/// A concrete value produced by the value policy, ready to assign to a field.
pub enum FieldValue {
    Str(String),
    Any(AnyValue),
    Bool(bool),
    Byte(u8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl FieldValue {
    /// Tag corresponding to this value's variant, used in error reporting.
    pub fn tag(&self) -> TypeTag {
        match self {
            FieldValue::Str(_) => TypeTag::Str,
            FieldValue::Any(_) => TypeTag::Any,
            FieldValue::Bool(_) => TypeTag::Bool,
            FieldValue::Byte(_) => TypeTag::Byte,
            FieldValue::Char(_) => TypeTag::Char,
            FieldValue::Short(_) => TypeTag::Short,
            FieldValue::Int(_) => TypeTag::Int,
            FieldValue::Long(_) => TypeTag::Long,
            FieldValue::Float(_) => TypeTag::Float,
            FieldValue::Double(_) => TypeTag::Double,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(v) => f.debug_tuple("Str").field(v).finish(),
            FieldValue::Any(_) => f.debug_tuple("Any").field(&"..").finish(),
            FieldValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            FieldValue::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            FieldValue::Char(v) => f.debug_tuple("Char").field(v).finish(),
            FieldValue::Short(v) => f.debug_tuple("Short").field(v).finish(),
            FieldValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            FieldValue::Long(v) => f.debug_tuple("Long").field(v).finish(),
            FieldValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            FieldValue::Double(v) => f.debug_tuple("Double").field(v).finish(),
        }
    }
}

/// How a target type can be brought into existence.
///
/// Classification is total over well-formed targets: every type reports
/// exactly one shape, and reporting it has no side effects.
#[derive(Debug, Clone, Copy)]
pub enum Constructibility<T> {
    /// The type has an invokable zero-argument constructor.
    Direct(fn() -> Result<T, ConstructionError>),
    /// The type is owned by an enclosing type and needs a live owner
    /// instance before it can exist. The constructor builds the owner
    /// first via the owner's own zero-argument constructor, then stores
    /// it in the explicit owner field.
    NestedNeedsEnclosing {
        enclosing: &'static str,
        construct: fn() -> Result<T, ConstructionError>,
    },
    /// No usable constructor shape.
    NotConstructible,
}

/// Capability trait every target type implements, normally through
/// `#[derive(Fixture)]`.
///
/// The generated impl lives on the type itself, which is what gives the
/// population pass write access to private fields.
pub trait Fixture: Sized + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Report the constructor shape of this type.
    fn constructibility() -> Constructibility<Self>;

    /// Declared fields of the type itself. The owner reference of a nested
    /// type is not part of this list. Processing order is unspecified.
    fn fields() -> &'static [FieldDescriptor];

    /// Assign `value` to the named field, regardless of the field's
    /// declared visibility. `Option`-wrapped fields receive `Some(value)`.
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), ConstructionError>;
}
