//! String to arbitrary-precision number conversion.

use std::error::Error as StdError;
use std::str::FromStr;

use typeconv_core::{
    AcceptsTargetKind, BigDecimal, BigInt, ClassTargetConverter, ConversionError, Converter,
    StringSourceConverter, TypeDescriptor, TypeName, Value,
};

/// Parses string sources into `BigInteger` or `BigDecimal` values.
///
/// Decimal sources may carry an exponent (`1.5e3`). Like the fixed-width
/// parsers, nothing is trimmed.
///
/// ```
/// use typeconv::StringToBigNumberConverter;
/// use typeconv_core::{Converter, TypeName, Value};
///
/// let out = StringToBigNumberConverter
///     .convert_to(&Value::from("123456789012345678901234567890"), TypeName::BigInteger)
///     .unwrap();
/// assert_eq!(out.to_string(), "123456789012345678901234567890");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StringToBigNumberConverter;

impl StringToBigNumberConverter {
    /// The target names this converter produces.
    pub const TARGETS: [TypeName; 2] = [TypeName::BigInteger, TypeName::BigDecimal];

    fn parse(source: &str, target: &TypeName) -> Result<Value, ConversionError> {
        match target {
            TypeName::BigInteger => parse::<BigInt>(source, target).map(Value::BigInteger),
            _ => parse::<BigDecimal>(source, target).map(Value::BigDecimal),
        }
    }
}

fn parse<T>(source: &str, target: &TypeName) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    source
        .parse::<T>()
        .map_err(|e| ConversionError::failed_with(format!("cannot parse '{source}' as {target}"), e))
}

impl ClassTargetConverter for StringToBigNumberConverter {
    fn expected_class(&self) -> String {
        "BigInteger or BigDecimal".to_string()
    }

    fn accepts_class(&self, target: &TypeName) -> bool {
        matches!(target, TypeName::BigInteger | TypeName::BigDecimal)
    }

    fn convert_class(&self, source: &Value, target: &TypeName) -> Result<Value, ConversionError> {
        match source {
            Value::String(s) => Self::parse(s, target),
            other => Err(ConversionError::source_unsupported(
                TypeName::String.to_string(),
                other.runtime_type(),
            )),
        }
    }
}

impl StringSourceConverter for StringToBigNumberConverter {
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.check_target(target)?;
        Self::parse(source, &target.erasure())
    }
}

impl Converter for StringToBigNumberConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.convert_string_source(source, target)
    }
}
