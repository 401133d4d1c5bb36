//! String to date/time conversion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use typeconv_core::{
    AcceptsTargetKind, ClassTargetConverter, ConversionError, Converter, StringSourceConverter,
    TypeDescriptor, TypeName, Value,
};

/// chrono format strings used by [`StringToTimeConverter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormats {
    pub date: String,
    pub time: String,
    pub date_time: String,
}

impl Default for TimeFormats {
    /// ISO 8601 local forms: `2021-03-04`, `05:06:07.5`, `2021-03-04T05:06:07`.
    fn default() -> Self {
        Self {
            date: "%Y-%m-%d".to_string(),
            time: "%H:%M:%S%.f".to_string(),
            date_time: "%Y-%m-%dT%H:%M:%S%.f".to_string(),
        }
    }
}

/// Parses string sources into `Date`, `Time` or `DateTime` values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringToTimeConverter {
    formats: TimeFormats,
}

impl StringToTimeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom chrono format strings.
    pub fn with_formats(mut self, formats: TimeFormats) -> Self {
        self.formats = formats;
        self
    }

    pub fn formats(&self) -> &TimeFormats {
        &self.formats
    }

    fn parse(&self, source: &str, target: &TypeName) -> Result<Value, chrono::ParseError> {
        match target {
            TypeName::Date => NaiveDate::parse_from_str(source, &self.formats.date).map(Value::Date),
            TypeName::Time => NaiveTime::parse_from_str(source, &self.formats.time).map(Value::Time),
            _ => NaiveDateTime::parse_from_str(source, &self.formats.date_time)
                .map(Value::DateTime),
        }
    }
}

impl ClassTargetConverter for StringToTimeConverter {
    fn expected_class(&self) -> String {
        "Date, Time or DateTime".to_string()
    }

    fn accepts_class(&self, target: &TypeName) -> bool {
        matches!(target, TypeName::Date | TypeName::Time | TypeName::DateTime)
    }

    fn convert_class(&self, source: &Value, target: &TypeName) -> Result<Value, ConversionError> {
        match source {
            Value::String(s) => self
                .parse(s, target)
                .map_err(|e| ConversionError::failed_with(format!("cannot parse '{s}' as {target}"), e)),
            other => Err(ConversionError::source_unsupported(
                TypeName::String.to_string(),
                other.runtime_type(),
            )),
        }
    }
}

impl StringSourceConverter for StringToTimeConverter {
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.check_target(target)?;
        let name = target.erasure();
        self.parse(source, &name).map_err(|e| {
            ConversionError::failed_with(format!("cannot parse '{source}' as {name}"), e)
        })
    }
}

impl Converter for StringToTimeConverter {
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.convert_string_source(source, target)
    }
}
