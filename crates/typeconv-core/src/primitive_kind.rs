//! Primitive type kinds and the primitive/boxed mapping table.
//!
//! Every primitive kind has two nominal spellings: the bare primitive
//! (`int32`) and its boxed, nullable form (`Int32`). Container converters only
//! care about the logical kind, so [`PrimitiveKind::of`] resolves both
//! spellings to the same entry.

use std::fmt;

use crate::TypeName;

/// Primitive type kinds.
///
/// The eight numeric/boolean/character kinds plus the `void` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// All primitive kinds, in table order.
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Void,
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
    ];

    /// Look up the logical kind of a nominal type.
    ///
    /// Returns the same kind for the primitive and the boxed spelling, and
    /// `None` for every non-primitive type name.
    ///
    /// ```
    /// use typeconv_core::{PrimitiveKind, TypeName};
    ///
    /// assert_eq!(
    ///     PrimitiveKind::of(&TypeName::Primitive(PrimitiveKind::Int32)),
    ///     PrimitiveKind::of(&TypeName::Boxed(PrimitiveKind::Int32)),
    /// );
    /// assert_eq!(PrimitiveKind::of(&TypeName::String), None);
    /// ```
    pub fn of(name: &TypeName) -> Option<PrimitiveKind> {
        match name {
            TypeName::Primitive(kind) | TypeName::Boxed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Find a kind by either its primitive or its boxed name.
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.primitive_name() == name || kind.boxed_name() == name)
    }

    /// Name of the bare primitive form.
    pub const fn primitive_name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
        }
    }

    /// Name of the boxed (nullable) form.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "Void",
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::Int8 => "Int8",
            PrimitiveKind::Int16 => "Int16",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Float32 => "Float32",
            PrimitiveKind::Float64 => "Float64",
        }
    }

    /// Whether this kind is numeric.
    pub const fn is_number(self) -> bool {
        self.numeric().is_some()
    }

    /// The numeric kind for this primitive, if it is one.
    pub const fn numeric(self) -> Option<NumericKind> {
        match self {
            PrimitiveKind::Int8 => Some(NumericKind::Int8),
            PrimitiveKind::Int16 => Some(NumericKind::Int16),
            PrimitiveKind::Int32 => Some(NumericKind::Int32),
            PrimitiveKind::Int64 => Some(NumericKind::Int64),
            PrimitiveKind::Float32 => Some(NumericKind::Float32),
            PrimitiveKind::Float64 => Some(NumericKind::Float64),
            PrimitiveKind::Void | PrimitiveKind::Bool | PrimitiveKind::Char => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primitive_name())
    }
}

/// The numeric subset of [`PrimitiveKind`].
///
/// These are the element kinds container converters parse directly instead
/// of going through a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl NumericKind {
    /// All numeric kinds.
    pub const ALL: [NumericKind; 6] = [
        NumericKind::Int8,
        NumericKind::Int16,
        NumericKind::Int32,
        NumericKind::Int64,
        NumericKind::Float32,
        NumericKind::Float64,
    ];

    /// Numeric kind of a nominal type (primitive or boxed).
    pub fn of(name: &TypeName) -> Option<NumericKind> {
        PrimitiveKind::of(name).and_then(PrimitiveKind::numeric)
    }

    /// The primitive kind this numeric kind belongs to.
    pub const fn primitive(self) -> PrimitiveKind {
        match self {
            NumericKind::Int8 => PrimitiveKind::Int8,
            NumericKind::Int16 => PrimitiveKind::Int16,
            NumericKind::Int32 => PrimitiveKind::Int32,
            NumericKind::Int64 => PrimitiveKind::Int64,
            NumericKind::Float32 => PrimitiveKind::Float32,
            NumericKind::Float64 => PrimitiveKind::Float64,
        }
    }

    /// Whether this is a floating point kind.
    pub const fn is_float(self) -> bool {
        matches!(self, NumericKind::Float32 | NumericKind::Float64)
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.primitive().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_and_boxed_resolve_to_same_kind() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::of(&TypeName::Primitive(kind)), Some(kind));
            assert_eq!(PrimitiveKind::of(&TypeName::Boxed(kind)), Some(kind));
        }
    }

    #[test]
    fn non_primitive_names_have_no_kind() {
        assert_eq!(PrimitiveKind::of(&TypeName::String), None);
        assert_eq!(PrimitiveKind::of(&TypeName::List), None);
        assert_eq!(PrimitiveKind::of(&TypeName::named("Point")), None);
    }

    #[test]
    fn lookup_by_either_name() {
        assert_eq!(PrimitiveKind::from_name("int32"), Some(PrimitiveKind::Int32));
        assert_eq!(PrimitiveKind::from_name("Int32"), Some(PrimitiveKind::Int32));
        assert_eq!(PrimitiveKind::from_name("void"), Some(PrimitiveKind::Void));
        assert_eq!(PrimitiveKind::from_name("integer"), None);
    }

    #[test]
    fn numeric_subset() {
        assert!(PrimitiveKind::Float64.is_number());
        assert!(!PrimitiveKind::Bool.is_number());
        assert!(!PrimitiveKind::Char.is_number());
        assert!(!PrimitiveKind::Void.is_number());
        for kind in NumericKind::ALL {
            assert_eq!(kind.primitive().numeric(), Some(kind));
        }
    }
}
