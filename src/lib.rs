//! typeconv - runtime type conversion.
//!
//! Given a live [`Value`] and a target [`TypeDescriptor`], a [`Dispatcher`]
//! finds a converter able to produce the target type and invokes it. Lookup
//! is two-tier: an exact `(source type, target descriptor)` registry first, then an
//! ordered list of predicates.
//!
//! This crate ships the leaf converters (numbers, big numbers, booleans,
//! dates and times, strings) and the container converters that split `"a, b, c"` into lists,
//! sets, other collections and arrays, converting each element on the way.
//! [`standard_dispatcher`] wires all of them together.
//!
//! ```
//! use typeconv::prelude::*;
//!
//! let dispatcher = standard_dispatcher();
//! let out = dispatcher
//!     .convert(&Value::from("1, 2 ,3"), &TypeDescriptor::list_of(PrimitiveKind::Int32))
//!     .unwrap();
//! assert_eq!(out, Value::list([Value::Int32(1), Value::Int32(2), Value::Int32(3)]));
//! ```

mod container;
mod converters;
mod standard;

pub use container::{
    ContainerFactories, ContainerFactory, ElementKind, ElementResolver, split_elements,
};
pub use converters::{
    AnythingToStringConverter, StringToArrayConverter, StringToBigNumberConverter,
    StringToBooleanConverter, StringToCollectionConverter, StringToNumberConverter,
    StringToTimeConverter, TimeFormats, parse_number,
};
pub use standard::{
    ANYTHING_TO_STRING, STRING_TO_ARRAY, STRING_TO_COLLECTION, register_standard_converters,
    standard_dispatcher, standard_dispatcher_with,
};

pub use typeconv_core::{
    ConversionError, Converter, NumericKind, PrimitiveKind, TypeDescriptor, TypeName, Value,
};
pub use typeconv_registry::{
    ConverterLocator, ConverterRegistry, Dispatcher, DispatcherHandle, SharedConverter,
};

pub mod prelude {
    pub use crate::{standard_dispatcher, standard_dispatcher_with};
    pub use typeconv_core::{
        ConversionError, Converter, FnConverter, NumericKind, PrimitiveKind, TypeDescriptor,
        TypeName, Value,
    };
    pub use typeconv_registry::{Dispatcher, DispatcherHandle, SharedConverter};
}
