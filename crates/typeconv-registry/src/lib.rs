//! Converter storage and dispatch for typeconv.
//!
//! - [`ConverterRegistry`]: exact `(source type, target type)` lookup
//! - [`ConverterLocator`]: ordered predicate lookup
//! - [`Dispatcher`]: both tiers, exact first
//! - [`DispatcherHandle`]: how converters reach a dispatcher for nested
//!   conversions

use std::sync::Arc;

use typeconv_core::Converter;

mod dispatcher;
mod locator;
mod registry;

pub use dispatcher::{Dispatcher, DispatcherHandle};
pub use locator::{ConverterLocator, Predicate};
pub use registry::ConverterRegistry;

/// A converter shared between registries and dispatchers.
pub type SharedConverter = Arc<dyn Converter>;
