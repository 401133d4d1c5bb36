//! Error types for conversion and descriptor construction.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ConversionError
//! ├── SourceTypeUnsupported - source value kind rejected by the converter
//! ├── TargetTypeUnsupported - target descriptor shape/type rejected
//! ├── ConversionFailed      - attempted, but no value could be produced
//! └── NoSuchConverter       - neither dispatch tier found a converter
//! DescriptorError           - invalid TypeDescriptor construction
//! ```
//!
//! Every failure is returned to the immediate caller. Nothing is retried or
//! defaulted, and a failing container conversion never exposes a partially
//! built container.

use std::error::Error as StdError;

use thiserror::Error;

use crate::TypeName;

/// Boxed underlying cause of a [`ConversionError::ConversionFailed`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Errors produced by converters and dispatchers.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The source value's runtime type is not one this converter accepts.
    ///
    /// Always reported before any conversion work happens.
    #[error("the type of 'source' must be {expected}, but it is {actual}")]
    SourceTypeUnsupported {
        /// What the converter accepts.
        expected: String,
        /// What it was given.
        actual: String,
    },

    /// The target descriptor's shape or nominal type is not one this
    /// converter produces.
    #[error("the type of 'target' must be {expected}, but it is {actual}")]
    TargetTypeUnsupported {
        /// What the converter accepts.
        expected: String,
        /// What it was given.
        actual: String,
    },

    /// Conversion was attempted but no value could be produced.
    #[error("conversion failed: {message}")]
    ConversionFailed {
        /// Human readable description.
        message: String,
        /// The underlying parse or construction error, if any.
        #[source]
        cause: Option<BoxedCause>,
    },

    /// No converter was found by either dispatch tier.
    #[error("no converter found from '{source_type}' to '{target_type}'")]
    NoSuchConverter {
        /// Runtime type name of the source value.
        source_type: String,
        /// Rendered name of the target descriptor.
        target_type: String,
    },
}

impl ConversionError {
    /// A [`ConversionError::SourceTypeUnsupported`].
    pub fn source_unsupported(expected: impl Into<String>, actual: impl ToString) -> Self {
        ConversionError::SourceTypeUnsupported {
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }

    /// A [`ConversionError::TargetTypeUnsupported`].
    pub fn target_unsupported(expected: impl Into<String>, actual: impl ToString) -> Self {
        ConversionError::TargetTypeUnsupported {
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }

    /// A [`ConversionError::ConversionFailed`] without a cause.
    pub fn failed(message: impl Into<String>) -> Self {
        ConversionError::ConversionFailed {
            message: message.into(),
            cause: None,
        }
    }

    /// A [`ConversionError::ConversionFailed`] wrapping the original error.
    pub fn failed_with(
        message: impl Into<String>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        ConversionError::ConversionFailed {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// A [`ConversionError::NoSuchConverter`].
    pub fn no_such_converter(source_type: impl ToString, target_type: impl ToString) -> Self {
        ConversionError::NoSuchConverter {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
        }
    }

    /// Whether this is a [`ConversionError::NoSuchConverter`].
    pub fn is_no_such_converter(&self) -> bool {
        matches!(self, ConversionError::NoSuchConverter { .. })
    }
}

/// Errors from building a [`TypeDescriptor`](crate::TypeDescriptor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Array classes cannot be the raw type of a parameterized descriptor.
    #[error("raw type of a parameterized descriptor must be a concrete type, but it is {0}")]
    ArrayRawType(TypeName),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ConversionError::source_unsupported(
            "String",
            TypeName::Boxed(crate::PrimitiveKind::Int32),
        );
        assert_eq!(
            err.to_string(),
            "the type of 'source' must be String, but it is Int32"
        );

        let err = ConversionError::no_such_converter("String", "geo.Point");
        assert_eq!(
            err.to_string(),
            "no converter found from 'String' to 'geo.Point'"
        );
        assert!(err.is_no_such_converter());
    }

    #[test]
    fn failed_preserves_cause() {
        let cause = "x1".parse::<i32>().unwrap_err();
        let err = ConversionError::failed_with("invalid int32 literal 'x1'", cause);

        let source = err.source().expect("cause should be preserved");
        assert_eq!(source.to_string(), "invalid digit found in string");
    }

    #[test]
    fn failed_without_cause() {
        let err = ConversionError::failed("at most one element type supported");
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "conversion failed: at most one element type supported"
        );
    }
}
