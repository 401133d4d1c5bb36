//! String to array conversion.

use tracing::trace;

use typeconv_core::{
    AcceptsSourceKind, ContainerTarget, ConversionError, Converter,
    ElementContainerTargetConverter, StringSourceConverter, TypeDescriptor, Value,
};
use typeconv_registry::DispatcherHandle;

use crate::container::{ElementResolver, split_elements};

/// Splits string sources into fixed-size arrays.
///
/// Both array descriptor forms are accepted: `TypeDescriptor::Array` and a
/// simple descriptor naming an array class. The result has exactly one
/// element per token.
#[derive(Debug, Default, Clone)]
pub struct StringToArrayConverter {
    dispatcher: DispatcherHandle,
}

impl StringToArrayConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert delegated element types through `dispatcher`.
    pub fn with_dispatcher_source(mut self, dispatcher: impl Into<DispatcherHandle>) -> Self {
        self.dispatcher = dispatcher.into();
        self
    }

    pub fn dispatcher_source(&self) -> &DispatcherHandle {
        &self.dispatcher
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn build(&self, source: &str, target: &ContainerTarget) -> Result<Value, ConversionError> {
        let ContainerTarget::Array { component } = target else {
            return Err(ConversionError::target_unsupported(
                "array type",
                "collection type",
            ));
        };
        let resolver = ElementResolver::new(Some(component), &self.dispatcher)?;
        let tokens = split_elements(source);
        trace!(component = %component, tokens = tokens.len(), "splitting into array");
        resolver.convert_all(&tokens).map(Value::Array)
    }
}

impl ElementContainerTargetConverter for StringToArrayConverter {
    fn convert_elements(
        &self,
        source: &Value,
        target: &ContainerTarget,
    ) -> Result<Value, ConversionError> {
        self.check_source(source)?;
        match source {
            Value::String(s) => self.build(s, target),
            other => Err(ConversionError::source_unsupported(
                self.expected_source(),
                other.runtime_type(),
            )),
        }
    }
}

impl StringSourceConverter for StringToArrayConverter {
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        match ContainerTarget::resolve(target)? {
            resolved @ ContainerTarget::Array { .. } => self.build(source, &resolved),
            ContainerTarget::Collection { .. } => {
                Err(ConversionError::target_unsupported("array type", target))
            }
        }
    }
}

impl Converter for StringToArrayConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.convert_string_source(source, target)
    }
}
