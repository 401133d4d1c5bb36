//! Core types for the typeconv conversion registry.
//!
//! This crate holds everything a converter implementation needs and nothing
//! about dispatch:
//!
//! - [`TypeName`] and [`PrimitiveKind`]: nominal type identity
//! - [`TypeDescriptor`]: conversion targets, including generic and array shapes
//! - [`Value`]: the live values being converted
//! - [`Converter`] and its capability traits
//! - [`ConversionError`]

mod converter;
mod error;
mod primitive_kind;
mod type_descriptor;
mod type_name;
mod value;

pub use converter::{
    AcceptsSourceKind, AcceptsTargetKind, BooleanConverter, ClassTargetConverter,
    CollectionTargetConverter, ContainerTarget, Converter, ElementContainerTargetConverter,
    FnConverter, NumberConverter, StringSourceConverter,
};
pub use error::{BoxedCause, ConversionError, DescriptorError};
pub use primitive_kind::{NumericKind, PrimitiveKind};
pub use type_descriptor::{ParameterizedType, TypeDescriptor};
pub use type_name::TypeName;
pub use value::{Value, ValueSet};

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
pub use ordered_float::OrderedFloat;
