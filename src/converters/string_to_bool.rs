//! String to boolean conversion.

use typeconv_core::{
    AcceptsTargetKind, BooleanConverter, ClassTargetConverter, ConversionError, Converter,
    PrimitiveKind, StringSourceConverter, TypeDescriptor, TypeName, Value,
};

/// Parses string sources into booleans.
///
/// `"true"` in any ASCII case is `true`; every other string is `false`.
/// Only the primitive and boxed boolean types are accepted as target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StringToBooleanConverter;

impl StringToBooleanConverter {
    pub fn parse(source: &str) -> bool {
        source.eq_ignore_ascii_case("true")
    }
}

impl BooleanConverter for StringToBooleanConverter {
    fn convert_bool(&self, source: &Value) -> Result<bool, ConversionError> {
        match source {
            Value::String(s) => Ok(Self::parse(s)),
            other => Err(ConversionError::source_unsupported(
                TypeName::String.to_string(),
                other.runtime_type(),
            )),
        }
    }
}

impl ClassTargetConverter for StringToBooleanConverter {
    fn expected_class(&self) -> String {
        format!(
            "{} or {}",
            PrimitiveKind::Bool.primitive_name(),
            PrimitiveKind::Bool.boxed_name()
        )
    }

    fn accepts_class(&self, target: &TypeName) -> bool {
        self.is_boolean(target)
    }

    fn convert_class(&self, source: &Value, _target: &TypeName) -> Result<Value, ConversionError> {
        self.convert_bool(source).map(Value::Bool)
    }
}

impl StringSourceConverter for StringToBooleanConverter {
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.check_target(target)?;
        Ok(Value::Bool(Self::parse(source)))
    }
}

impl Converter for StringToBooleanConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.convert_string_source(source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bool_target() -> TypeDescriptor {
        TypeDescriptor::simple(TypeName::Boxed(PrimitiveKind::Bool))
    }

    #[test]
    fn true_in_any_case() {
        for source in ["true", "TRUE", "True", "tRuE"] {
            assert_eq!(
                StringToBooleanConverter
                    .convert(&Value::from(source), &bool_target())
                    .unwrap(),
                Value::Bool(true)
            );
        }
    }

    #[test]
    fn everything_else_is_false() {
        for source in ["false", "", "1", "yes", " true"] {
            assert_eq!(
                StringToBooleanConverter
                    .convert(&Value::from(source), &bool_target())
                    .unwrap(),
                Value::Bool(false)
            );
        }
    }

    #[test]
    fn primitive_target_is_accepted() {
        let out = StringToBooleanConverter
            .convert_to(&Value::from("true"), TypeName::Primitive(PrimitiveKind::Bool))
            .unwrap();
        assert_eq!(out, Value::Bool(true));
    }

    #[test]
    fn numeric_target_is_rejected() {
        let err = StringToBooleanConverter
            .convert_to(&Value::from("true"), TypeName::Primitive(PrimitiveKind::Int32))
            .unwrap_err();
        match err {
            ConversionError::TargetTypeUnsupported { expected, actual } => {
                assert_eq!(expected, "bool or Bool");
                assert_eq!(actual, "int32");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_string_source_is_rejected() {
        let err = StringToBooleanConverter
            .convert(&Value::Bool(true), &bool_target())
            .unwrap_err();
        assert!(matches!(err, ConversionError::SourceTypeUnsupported { .. }));
    }
}
