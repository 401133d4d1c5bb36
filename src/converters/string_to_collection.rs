//! String to list/set/collection conversion.

use tracing::trace;

use typeconv_core::{
    AcceptsSourceKind, CollectionTargetConverter, ContainerTarget, ConversionError, Converter,
    StringSourceConverter, TypeDescriptor, TypeName, Value,
};
use typeconv_registry::DispatcherHandle;

use crate::container::{ContainerFactories, ElementResolver, split_elements};

/// Splits string sources into lists, sets and other collections.
///
/// `List` and `Set` targets are built directly. Other container names need a
/// constructor registered with [`StringToCollectionConverter::with_container`].
/// Element types that are neither strings nor numbers are converted through
/// the dispatcher source, [`Dispatcher::shared_default`] unless configured.
///
/// ```
/// use typeconv::StringToCollectionConverter;
/// use typeconv_core::{Converter, PrimitiveKind, TypeDescriptor, Value};
///
/// let converter = StringToCollectionConverter::new();
/// let target = TypeDescriptor::list_of(PrimitiveKind::Int32);
/// let out = converter.convert(&Value::from("1, 2 ,3"), &target).unwrap();
/// assert_eq!(out, Value::list([Value::Int32(1), Value::Int32(2), Value::Int32(3)]));
/// ```
///
/// [`Dispatcher::shared_default`]: typeconv_registry::Dispatcher::shared_default
#[derive(Debug, Default, Clone)]
pub struct StringToCollectionConverter {
    dispatcher: DispatcherHandle,
    factories: ContainerFactories,
}

impl StringToCollectionConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert delegated element types through `dispatcher`.
    pub fn with_dispatcher_source(mut self, dispatcher: impl Into<DispatcherHandle>) -> Self {
        self.dispatcher = dispatcher.into();
        self
    }

    /// Register the constructor of a concrete container type.
    pub fn with_container<F>(mut self, container: TypeName, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.factories.register(container, factory);
        self
    }

    pub fn dispatcher_source(&self) -> &DispatcherHandle {
        &self.dispatcher
    }

    pub fn factories(&self) -> &ContainerFactories {
        &self.factories
    }

    pub fn factories_mut(&mut self) -> &mut ContainerFactories {
        &mut self.factories
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn build(
        &self,
        source: &str,
        container: &TypeName,
        element: Option<&TypeDescriptor>,
    ) -> Result<Value, ConversionError> {
        let resolver = ElementResolver::new(element, &self.dispatcher)?;
        let tokens = split_elements(source);
        trace!(container = %container, tokens = tokens.len(), "splitting into collection");

        let mut collection = self.factories.create(container, tokens.len())?;
        for element in resolver.convert_all(&tokens)? {
            collection.push_element(element).map_err(|_| {
                ConversionError::failed(format!("{container} does not accept elements"))
            })?;
        }
        Ok(collection)
    }
}

impl CollectionTargetConverter for StringToCollectionConverter {
    fn convert_collection(
        &self,
        source: &Value,
        container: &TypeName,
        element: Option<&TypeDescriptor>,
    ) -> Result<Value, ConversionError> {
        self.check_source(source)?;
        match source {
            Value::String(s) => self.build(s, container, element),
            other => Err(ConversionError::source_unsupported(
                self.expected_source(),
                other.runtime_type(),
            )),
        }
    }
}

impl StringSourceConverter for StringToCollectionConverter {
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        match ContainerTarget::resolve_collection(target)? {
            ContainerTarget::Collection { container, element } => {
                self.build(source, &container, element.as_ref())
            }
            ContainerTarget::Array { .. } => {
                Err(ConversionError::target_unsupported("collection type", target))
            }
        }
    }
}

impl Converter for StringToCollectionConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.convert_string_source(source, target)
    }
}
