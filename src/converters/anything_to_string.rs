//! Any value to string conversion.

use typeconv_core::{AcceptsTargetKind, ConversionError, Converter, TypeDescriptor, TypeName, Value};

/// Renders any value as a string.
///
/// Lists, sets and arrays render as `[a, b, c]` with nested containers
/// rendered the same way; `Null` renders as `null`. The target must be
/// `String`, or a parameterized descriptor whose raw type is `String` and
/// which carries at least one type argument.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnythingToStringConverter;

impl AnythingToStringConverter {
    pub fn render(source: &Value) -> String {
        source.to_string()
    }
}

impl AcceptsTargetKind for AnythingToStringConverter {
    fn expected_target(&self) -> String {
        TypeName::String.to_string()
    }

    fn accepts_target(&self, target: &TypeDescriptor) -> bool {
        match target {
            TypeDescriptor::Simple(TypeName::String) => true,
            TypeDescriptor::Parameterized(p) => {
                *p.raw() == TypeName::String && !p.type_arguments().is_empty()
            }
            _ => false,
        }
    }
}

impl Converter for AnythingToStringConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.check_target(target)?;
        Ok(Value::String(Self::render(source)))
    }
}
