//! Runtime values.
//!
//! [`Value`] is the live source and result of every conversion. Floats are
//! wrapped in [`OrderedFloat`] so that values can be hashed and stored in a
//! [`ValueSet`].

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use ordered_float::OrderedFloat;
use rustc_hash::{FxHashSet, FxHasher};

use crate::{PrimitiveKind, TypeName};

/// Hash-based set of values.
pub type ValueSet = FxHashSet<Value>;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(OrderedFloat<f32>),
    Float64(OrderedFloat<f64>),
    BigInteger(BigInt),
    /// Compares by numeric value, so `1.0` equals `1.00`.
    BigDecimal(BigDecimal),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// Growable, insertion-ordered sequence.
    List(Vec<Value>),
    /// Hash-based set; duplicates collapse.
    Set(ValueSet),
    /// Fixed-length array.
    Array(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// An instance of a user-defined nominal type.
    Object {
        type_name: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Runtime type of this value, used as the exact-match source key.
    pub fn runtime_type(&self) -> TypeName {
        match self {
            Value::Null => TypeName::Null,
            Value::Bool(_) => TypeName::Primitive(PrimitiveKind::Bool),
            Value::Char(_) => TypeName::Primitive(PrimitiveKind::Char),
            Value::Int8(_) => TypeName::Primitive(PrimitiveKind::Int8),
            Value::Int16(_) => TypeName::Primitive(PrimitiveKind::Int16),
            Value::Int32(_) => TypeName::Primitive(PrimitiveKind::Int32),
            Value::Int64(_) => TypeName::Primitive(PrimitiveKind::Int64),
            Value::Float32(_) => TypeName::Primitive(PrimitiveKind::Float32),
            Value::Float64(_) => TypeName::Primitive(PrimitiveKind::Float64),
            Value::BigInteger(_) => TypeName::BigInteger,
            Value::BigDecimal(_) => TypeName::BigDecimal,
            Value::String(_) => TypeName::String,
            Value::Date(_) => TypeName::Date,
            Value::Time(_) => TypeName::Time,
            Value::DateTime(_) => TypeName::DateTime,
            Value::List(_) => TypeName::List,
            Value::Set(_) => TypeName::Set,
            Value::Array(_) => TypeName::array_of(TypeName::Object),
            Value::Map(_) => TypeName::Map,
            Value::Object { type_name, .. } => TypeName::Named(type_name.clone()),
        }
    }

    /// Build a list value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Build a set value.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(items.into_iter().collect())
    }

    /// Build an array value.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    /// Build an object value.
    pub fn object(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Value::Object {
            type_name: type_name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integer value widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Any numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(f64::from(v.into_inner())),
            Value::Float64(v) => Some(v.into_inner()),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Elements of a list, array or set, or `None` for other values.
    ///
    /// Set iteration order is unspecified.
    pub fn elements(&self) -> Option<Vec<&Value>> {
        match self {
            Value::List(items) | Value::Array(items) => Some(items.iter().collect()),
            Value::Set(items) => Some(items.iter().collect()),
            _ => None,
        }
    }

    /// Number of elements of a container value.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(items) | Value::Array(items) => Some(items.len()),
            Value::Set(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Whether this value is a growable element container (list or set).
    pub fn is_element_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Set(_))
    }

    /// Append to a list or insert into a set.
    ///
    /// Returns the element back if this value is not a growable container.
    pub fn push_element(&mut self, element: Value) -> Result<(), Value> {
        match self {
            Value::List(items) => {
                items.push(element);
                Ok(())
            }
            Value::Set(items) => {
                items.insert(element);
                Ok(())
            }
            _ => Err(element),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Char(v) => v.hash(state),
            Value::Int8(v) => v.hash(state),
            Value::Int16(v) => v.hash(state),
            Value::Int32(v) => v.hash(state),
            Value::Int64(v) => v.hash(state),
            Value::Float32(v) => v.hash(state),
            Value::Float64(v) => v.hash(state),
            Value::BigInteger(v) => v.hash(state),
            Value::BigDecimal(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
            Value::Time(v) => v.hash(state),
            Value::DateTime(v) => v.hash(state),
            Value::List(items) | Value::Array(items) => items.hash(state),
            Value::Set(items) => {
                // Order independent: equal sets must hash equally.
                let combined = items.iter().fold(0u64, |acc, item| {
                    let mut hasher = FxHasher::default();
                    item.hash(&mut hasher);
                    acc.wrapping_add(hasher.finish())
                });
                state.write_usize(items.len());
                state.write_u64(combined);
            }
            Value::Map(entries) => entries.hash(state),
            Value::Object { type_name, fields } => {
                type_name.hash(state);
                fields.hash(state);
            }
        }
    }
}

fn write_joined<'a>(
    f: &mut Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::BigInteger(v) => write!(f, "{v}"),
            Value::BigDecimal(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Date(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::List(items) | Value::Array(items) => write_joined(f, items.iter()),
            Value::Set(items) => write_joined(f, items.iter()),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Value::Object { type_name, fields } => {
                write!(f, "{type_name}{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    char => Char,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    BigInt => BigInteger,
    BigDecimal => BigDecimal,
    String => String,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_types() {
        assert_eq!(Value::from("a").runtime_type(), TypeName::String);
        assert_eq!(
            Value::from(1i32).runtime_type(),
            TypeName::Primitive(PrimitiveKind::Int32)
        );
        assert_eq!(Value::Null.runtime_type(), TypeName::Null);
        assert_eq!(Value::List(Vec::new()).runtime_type(), TypeName::List);
        assert_eq!(
            Value::object("geo.Point", Vec::new()).runtime_type(),
            TypeName::named("geo.Point")
        );
    }

    #[test]
    fn set_collapses_duplicates() {
        let set = Value::set([Value::from(1i32), Value::from(1i32), Value::from(2i32)]);
        assert_eq!(set.len(), Some(2));
    }

    #[test]
    fn equal_sets_hash_equally() {
        let a = Value::set((0..20i32).map(Value::from));
        let b = Value::set((0..20i32).rev().map(Value::from));
        assert_eq!(a, b);

        let mut outer = ValueSet::default();
        outer.insert(a);
        outer.insert(b);
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn float_values_are_hashable() {
        let set = Value::set([
            Value::from(1.5f64),
            Value::from(1.5f64),
            Value::from(2.5f64),
        ]);
        assert_eq!(set.len(), Some(2));
    }

    #[test]
    fn push_element() {
        let mut list = Value::List(Vec::new());
        list.push_element(Value::from("a")).unwrap();
        list.push_element(Value::from("b")).unwrap();
        assert_eq!(list, Value::list([Value::from("a"), Value::from("b")]));

        let mut not_container = Value::from(1i32);
        assert_eq!(
            not_container.push_element(Value::from("a")),
            Err(Value::from("a"))
        );
    }

    #[test]
    fn display() {
        let nested = Value::array([
            Value::array([Value::from(1i32), Value::from(2i32)]),
            Value::array([Value::from(3i32)]),
        ]);
        assert_eq!(nested.to_string(), "[[1, 2], [3]]");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Array(Vec::new()).to_string(), "[]");
        assert_eq!(
            Value::object("Point", [("x".to_string(), Value::from(1i32))]).to_string(),
            "Point{x=1}"
        );
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::from(7i8).as_i64(), Some(7));
        assert_eq!(Value::from(2.5f32).as_f64(), Some(2.5));
        assert_eq!(Value::from("7").as_i64(), None);
    }

    #[test]
    fn big_numbers() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let value = Value::from(big.clone());
        assert_eq!(value.runtime_type(), TypeName::BigInteger);
        assert_eq!(value.to_string(), "123456789012345678901234567890");

        let one: BigDecimal = "1.0".parse().unwrap();
        let same: BigDecimal = "1.00".parse().unwrap();
        assert_eq!(Value::from(one.clone()).runtime_type(), TypeName::BigDecimal);
        let set = Value::set([Value::from(one), Value::from(same), Value::from(big)]);
        assert_eq!(set.len(), Some(2));
    }
}
