//! Dispatcher - two-tier converter lookup and invocation.
//!
//! A [`Dispatcher`] owns one [`ConverterRegistry`] and one
//! [`ConverterLocator`]. [`Dispatcher::convert`] tries the exact tier with
//! `(source.runtime_type(), target)`, falls back to the predicate
//! tier with `(source, target)`, and reports
//! [`ConversionError::NoSuchConverter`] when neither has a match.
//!
//! Container converters reach a dispatcher for their element types through a
//! [`DispatcherHandle`].

use std::sync::{Arc, OnceLock, Weak};

use tracing::{debug, trace};
use typeconv_core::{ConversionError, Converter, TypeDescriptor, TypeName, Value};

use crate::{ConverterLocator, ConverterRegistry, SharedConverter};

/// Looks up and invokes converters.
#[derive(Debug, Default, Clone)]
pub struct Dispatcher {
    registry: ConverterRegistry,
    locator: ConverterLocator,
}

impl Dispatcher {
    /// Create a dispatcher with empty tiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher from prepared tiers.
    pub fn from_parts(registry: ConverterRegistry, locator: ConverterLocator) -> Self {
        Self { registry, locator }
    }

    /// Split the dispatcher back into its tiers.
    pub fn into_parts(self) -> (ConverterRegistry, ConverterLocator) {
        (self.registry, self.locator)
    }

    /// The process-wide default dispatcher.
    ///
    /// Built lazily on first use and never mutated afterwards. It is empty:
    /// every conversion through it fails with
    /// [`ConversionError::NoSuchConverter`] unless a caller builds its own.
    pub fn shared_default() -> Arc<Dispatcher> {
        static DEFAULT: OnceLock<Arc<Dispatcher>> = OnceLock::new();
        Arc::clone(DEFAULT.get_or_init(|| Arc::new(Dispatcher::new())))
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.registry
    }

    pub fn locator(&self) -> &ConverterLocator {
        &self.locator
    }

    pub fn locator_mut(&mut self) -> &mut ConverterLocator {
        &mut self.locator
    }

    /// Find the converter for `(source, target)` without invoking it.
    pub fn find(&self, source: &Value, target: &TypeDescriptor) -> Option<&SharedConverter> {
        let source_type = source.runtime_type();
        if let Some(converter) = self.registry.lookup(&source_type, target) {
            trace!(source_type = %source_type, target_type = %target, "exact converter hit");
            return Some(converter);
        }
        if let Some(converter) = self.locator.lookup(source, target) {
            trace!(source_type = %source_type, target_type = %target, "predicate converter hit");
            return Some(converter);
        }
        None
    }

    /// Whether some converter would handle `(source, target)`.
    pub fn can_convert(&self, source: &Value, target: &TypeDescriptor) -> bool {
        self.find(source, target).is_some()
    }

    /// Convert `source` into a value of type `target`.
    ///
    /// Errors raised by the selected converter are returned unchanged.
    ///
    /// # Errors
    ///
    /// [`ConversionError::NoSuchConverter`] if neither tier has a converter
    /// for `(source, target)`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        match self.find(source, target) {
            Some(converter) => converter.convert(source, target),
            None => {
                let source_type = source.runtime_type();
                debug!(source_type = %source_type, target_type = %target, "no converter found");
                Err(ConversionError::no_such_converter(source_type, target))
            }
        }
    }

    /// Convert into a plain nominal type.
    pub fn convert_to(&self, source: &Value, target: TypeName) -> Result<Value, ConversionError> {
        self.convert(source, &TypeDescriptor::Simple(target))
    }
}

/// How a converter reaches the dispatcher it delegates element conversion to.
#[derive(Debug, Clone, Default)]
pub enum DispatcherHandle {
    /// [`Dispatcher::shared_default`].
    #[default]
    SharedDefault,
    /// A dispatcher owned elsewhere and kept alive by this handle.
    Shared(Arc<Dispatcher>),
    /// A dispatcher that may own the converter holding this handle.
    Weak(Weak<Dispatcher>),
    /// No dispatcher; delegated conversions fail with
    /// [`ConversionError::NoSuchConverter`].
    Detached,
}

impl DispatcherHandle {
    /// The dispatcher behind this handle, if it is still alive.
    pub fn resolve(&self) -> Option<Arc<Dispatcher>> {
        match self {
            DispatcherHandle::SharedDefault => Some(Dispatcher::shared_default()),
            DispatcherHandle::Shared(dispatcher) => Some(Arc::clone(dispatcher)),
            DispatcherHandle::Weak(dispatcher) => dispatcher.upgrade(),
            DispatcherHandle::Detached => None,
        }
    }

    /// Convert through the resolved dispatcher.
    ///
    /// A missing dispatcher is reported as
    /// [`ConversionError::NoSuchConverter`].
    pub fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        match self.resolve() {
            Some(dispatcher) => dispatcher.convert(source, target),
            None => {
                debug!(target_type = %target, "no dispatcher available");
                Err(ConversionError::no_such_converter(source.runtime_type(), target))
            }
        }
    }
}

impl From<Arc<Dispatcher>> for DispatcherHandle {
    fn from(dispatcher: Arc<Dispatcher>) -> Self {
        DispatcherHandle::Shared(dispatcher)
    }
}

impl From<Weak<Dispatcher>> for DispatcherHandle {
    fn from(dispatcher: Weak<Dispatcher>) -> Self {
        DispatcherHandle::Weak(dispatcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeconv_core::{FnConverter, PrimitiveKind};

    fn constant(value: Value) -> SharedConverter {
        Arc::new(FnConverter::new(move |_, _| Ok(value.clone())))
    }

    fn int32() -> TypeName {
        TypeName::Boxed(PrimitiveKind::Int32)
    }

    #[test]
    fn empty_dispatcher_reports_no_such_converter() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher
            .convert(&Value::from("1"), &TypeDescriptor::simple(int32()))
            .unwrap_err();
        match err {
            ConversionError::NoSuchConverter {
                source_type,
                target_type,
            } => {
                assert_eq!(source_type, "String");
                assert_eq!(target_type, "Int32");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn exact_tier_keys_on_the_full_target() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .registry_mut()
            .register(TypeName::String, TypeName::List, constant(Value::from("raw list")));
        dispatcher.locator_mut().register(
            "list-of-int32",
            constant(Value::from("predicate")),
            |_: &Value, target: &TypeDescriptor| {
                *target == TypeDescriptor::list_of(TypeName::Boxed(PrimitiveKind::Int32))
            },
        );

        // A raw `List` entry does not capture `List<Int32>`.
        let out = dispatcher
            .convert(&Value::from("a"), &TypeDescriptor::list_of(int32()))
            .unwrap();
        assert_eq!(out, Value::from("predicate"));

        let raw = dispatcher.convert_to(&Value::from("a"), TypeName::List).unwrap();
        assert_eq!(raw, Value::from("raw list"));

        let err = dispatcher
            .convert(&Value::from("a"), &TypeDescriptor::list_of(TypeName::Date))
            .unwrap_err();
        assert!(err.is_no_such_converter());
    }

    #[test]
    fn exact_tier_accepts_parameterized_keys() {
        let mut dispatcher = Dispatcher::new();
        let target = TypeDescriptor::set_of(TypeName::Date);
        dispatcher
            .registry_mut()
            .register(TypeName::String, target.clone(), constant(Value::from("dates")));

        assert_eq!(
            dispatcher.convert(&Value::from("a"), &target).unwrap(),
            Value::from("dates")
        );
        assert!(!dispatcher.can_convert(&Value::from("a"), &TypeDescriptor::simple(TypeName::Set)));
    }

    #[test]
    fn exact_tier_wins_over_predicate_tier() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.locator_mut().register(
            "everything",
            constant(Value::from("predicate")),
            |_: &Value, _: &TypeDescriptor| true,
        );
        dispatcher
            .registry_mut()
            .register(TypeName::String, int32(), constant(Value::from("exact")));

        let exact = dispatcher.convert_to(&Value::from("1"), int32()).unwrap();
        assert_eq!(exact, Value::from("exact"));

        let fallback = dispatcher.convert_to(&Value::from("1"), TypeName::Date).unwrap();
        assert_eq!(fallback, Value::from("predicate"));
    }

    #[test]
    fn converter_errors_pass_through() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.registry_mut().register(
            TypeName::String,
            int32(),
            Arc::new(FnConverter::new(|_, _| Err(ConversionError::failed("boom")))),
        );

        let err = dispatcher.convert_to(&Value::from("x"), int32()).unwrap_err();
        assert!(matches!(err, ConversionError::ConversionFailed { .. }));
        assert_eq!(err.to_string(), "conversion failed: boom");
    }

    #[test]
    fn parts_round_trip() {
        let mut registry = ConverterRegistry::new();
        registry.register(TypeName::String, int32(), constant(Value::Int32(1)));
        let dispatcher = Dispatcher::from_parts(registry, ConverterLocator::new());
        assert!(dispatcher.can_convert(&Value::from("1"), &TypeDescriptor::simple(int32())));

        let (registry, locator) = dispatcher.into_parts();
        assert_eq!(registry.len(), 1);
        assert!(locator.is_empty());
    }

    #[test]
    fn shared_default_is_one_empty_instance() {
        let first = Dispatcher::shared_default();
        let second = Dispatcher::shared_default();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.registry().is_empty());
        assert!(first.locator().is_empty());
    }

    #[test]
    fn handles_resolve() {
        let dispatcher = Arc::new(Dispatcher::new());

        assert!(DispatcherHandle::default().resolve().is_some());
        assert!(DispatcherHandle::Detached.resolve().is_none());

        let shared = DispatcherHandle::from(Arc::clone(&dispatcher));
        assert!(Arc::ptr_eq(&shared.resolve().unwrap(), &dispatcher));

        let weak = DispatcherHandle::from(Arc::downgrade(&dispatcher));
        assert!(weak.resolve().is_some());
        drop(shared);
        drop(dispatcher);
        assert!(weak.resolve().is_none());
    }

    #[test]
    fn detached_handle_reports_no_such_converter() {
        let err = DispatcherHandle::Detached
            .convert(&Value::from("1"), &TypeDescriptor::simple(TypeName::Date))
            .unwrap_err();
        assert!(err.is_no_such_converter());
    }
}
