//! Nominal type identifiers.
//!
//! [`TypeName`] is the typed replacement for reflection-style class names. The
//! well-known kinds the converters care about get their own variant; anything
//! else is carried as [`TypeName::Named`].

use std::fmt::{self, Display, Formatter};

use crate::PrimitiveKind;

/// A nominal (non-generic) type.
///
/// The exact-match tier keys sources on it. Parameterized and array
/// structure lives in [`TypeDescriptor`](crate::TypeDescriptor); a
/// `TypeName` is always the erased form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeName {
    /// A bare primitive (`int32`, `bool`, ...).
    Primitive(PrimitiveKind),
    /// The boxed, nullable form of a primitive (`Int32`, `Bool`, ...).
    Boxed(PrimitiveKind),
    /// UTF-8 string.
    String,
    /// The top type. Container converters treat it like `String`.
    Object,
    /// Runtime type of the null value.
    Null,
    /// The generic collection interface.
    Collection,
    /// The generic list interface.
    List,
    /// The generic set interface.
    Set,
    /// The generic map interface.
    Map,
    /// Calendar date without a zone.
    Date,
    /// Wall-clock time without a zone.
    Time,
    /// Date and time without a zone.
    DateTime,
    /// Arbitrary-precision integer.
    BigInteger,
    /// Arbitrary-precision decimal.
    BigDecimal,
    /// The erased array class for a component type.
    Array(Box<TypeName>),
    /// Any other nominal type, identified by name.
    Named(String),
}

impl TypeName {
    /// Create a [`TypeName::Named`].
    pub fn named(name: impl Into<String>) -> Self {
        TypeName::Named(name.into())
    }

    /// Create the erased array class of `component`.
    pub fn array_of(component: TypeName) -> Self {
        TypeName::Array(Box::new(component))
    }

    /// Bare primitive shorthand.
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        TypeName::Primitive(kind)
    }

    /// Boxed primitive shorthand.
    pub const fn boxed(kind: PrimitiveKind) -> Self {
        TypeName::Boxed(kind)
    }

    /// Whether this is the primitive or boxed form of `kind`.
    pub fn is_kind(&self, kind: PrimitiveKind) -> bool {
        PrimitiveKind::of(self) == Some(kind)
    }

    /// Whether this is one of the collection-like interfaces or a named
    /// type that is not otherwise known.
    ///
    /// Named types are treated as potential concrete containers; whether one
    /// can actually be built is decided by the container factory.
    pub fn is_collection_like(&self) -> bool {
        matches!(
            self,
            TypeName::Collection | TypeName::List | TypeName::Set | TypeName::Named(_)
        )
    }

    /// Component type if this is an array class.
    pub fn array_component(&self) -> Option<&TypeName> {
        match self {
            TypeName::Array(component) => Some(component),
            _ => None,
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Primitive(kind) => f.write_str(kind.primitive_name()),
            TypeName::Boxed(kind) => f.write_str(kind.boxed_name()),
            TypeName::String => f.write_str("String"),
            TypeName::Object => f.write_str("Object"),
            TypeName::Null => f.write_str("null"),
            TypeName::Collection => f.write_str("Collection"),
            TypeName::List => f.write_str("List"),
            TypeName::Set => f.write_str("Set"),
            TypeName::Map => f.write_str("Map"),
            TypeName::Date => f.write_str("Date"),
            TypeName::Time => f.write_str("Time"),
            TypeName::DateTime => f.write_str("DateTime"),
            TypeName::BigInteger => f.write_str("BigInteger"),
            TypeName::BigDecimal => f.write_str("BigDecimal"),
            TypeName::Array(component) => write!(f, "{component}[]"),
            TypeName::Named(name) => f.write_str(name),
        }
    }
}

impl From<PrimitiveKind> for TypeName {
    fn from(kind: PrimitiveKind) -> Self {
        TypeName::Primitive(kind)
    }
}
