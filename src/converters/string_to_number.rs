//! String to number conversion.

use std::error::Error as StdError;
use std::str::FromStr;

use typeconv_core::{
    AcceptsTargetKind, ClassTargetConverter, ConversionError, Converter, NumberConverter,
    NumericKind, OrderedFloat, StringSourceConverter, TypeDescriptor, TypeName, Value,
};

/// Parses string sources into one numeric kind.
///
/// Accepts the primitive and boxed spelling of its kind as target. Parsing
/// follows `str::parse`: no trimming, no radix prefixes.
///
/// ```
/// use typeconv::StringToNumberConverter;
/// use typeconv_core::{Converter, NumericKind, PrimitiveKind, TypeName, Value};
///
/// let converter = StringToNumberConverter::new(NumericKind::Int32);
/// let out = converter
///     .convert_to(&Value::from("114"), TypeName::Primitive(PrimitiveKind::Int32))
///     .unwrap();
/// assert_eq!(out, Value::Int32(114));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringToNumberConverter {
    kind: NumericKind,
}

impl StringToNumberConverter {
    pub const fn new(kind: NumericKind) -> Self {
        Self { kind }
    }

    /// One converter per numeric kind.
    pub fn all() -> impl Iterator<Item = StringToNumberConverter> {
        NumericKind::ALL.into_iter().map(StringToNumberConverter::new)
    }

    pub const fn kind(&self) -> NumericKind {
        self.kind
    }
}

/// Parse `source` as `kind`.
///
/// This is the routine container converters use for numeric elements.
pub fn parse_number(source: &str, kind: NumericKind) -> Result<Value, ConversionError> {
    match kind {
        NumericKind::Int8 => parse::<i8>(source, kind).map(Value::Int8),
        NumericKind::Int16 => parse::<i16>(source, kind).map(Value::Int16),
        NumericKind::Int32 => parse::<i32>(source, kind).map(Value::Int32),
        NumericKind::Int64 => parse::<i64>(source, kind).map(Value::Int64),
        NumericKind::Float32 => parse::<f32>(source, kind).map(|v| Value::Float32(OrderedFloat(v))),
        NumericKind::Float64 => parse::<f64>(source, kind).map(|v| Value::Float64(OrderedFloat(v))),
    }
}

fn parse<T>(source: &str, kind: NumericKind) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    source
        .parse::<T>()
        .map_err(|e| ConversionError::failed_with(format!("cannot parse '{source}' as {kind}"), e))
}

impl NumberConverter for StringToNumberConverter {
    fn expected(&self) -> NumericKind {
        self.kind
    }

    fn convert_number(&self, source: &Value) -> Result<Value, ConversionError> {
        match source {
            Value::String(s) => parse_number(s, self.kind),
            other => Err(ConversionError::source_unsupported(
                TypeName::String.to_string(),
                other.runtime_type(),
            )),
        }
    }
}

impl ClassTargetConverter for StringToNumberConverter {
    fn expected_class(&self) -> String {
        let primitive = self.kind.primitive();
        format!("{} or {}", primitive.primitive_name(), primitive.boxed_name())
    }

    fn accepts_class(&self, target: &TypeName) -> bool {
        self.is_expected(target)
    }

    fn convert_class(&self, source: &Value, _target: &TypeName) -> Result<Value, ConversionError> {
        self.convert_number(source)
    }
}

impl StringSourceConverter for StringToNumberConverter {
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.check_target(target)?;
        parse_number(source, self.kind)
    }
}

impl Converter for StringToNumberConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.convert_string_source(source, target)
    }
}
