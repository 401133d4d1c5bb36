//! The converter contract and its capability traits.
//!
//! [`Converter`] is the single extension point. Concrete converters describe
//! what they accept through small capability traits instead of a class
//! hierarchy:
//!
//! - [`AcceptsSourceKind`] / [`AcceptsTargetKind`]: declare the accepted
//!   source values and target descriptors, and reject everything else before
//!   doing any work.
//! - [`StringSourceConverter`]: string sources only.
//! - [`ClassTargetConverter`]: simple (non-generic) targets only.
//! - [`NumberConverter`] / [`BooleanConverter`]: one numeric kind, or the
//!   boolean kind, as target.
//! - [`CollectionTargetConverter`] / [`ElementContainerTargetConverter`]:
//!   containers with at most one element type argument.
//!
//! A converter combines these by delegation: its `Converter::convert` calls
//! the provided method of the capability it implements.

use crate::{ConversionError, NumericKind, PrimitiveKind, TypeDescriptor, TypeName, Value};

/// Converts a source value into a value of the target type.
///
/// Converters never mutate the source. They are shared across dispatchers, so
/// they must be `Send + Sync`.
pub trait Converter: Send + Sync {
    /// Convert `source` into a value of type `target`.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::TargetTypeUnsupported`] if the target shape or
    ///   nominal type is not handled by this converter.
    /// - [`ConversionError::SourceTypeUnsupported`] if the source value is
    ///   not accepted.
    /// - [`ConversionError::ConversionFailed`] if the value could not be
    ///   produced.
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError>;

    /// Convert into a plain nominal type.
    ///
    /// Identical to calling [`Converter::convert`] with
    /// `TypeDescriptor::Simple(target)`.
    fn convert_to(&self, source: &Value, target: TypeName) -> Result<Value, ConversionError> {
        self.convert(source, &TypeDescriptor::Simple(target))
    }
}

/// A converter backed by a closure.
///
/// ```
/// use typeconv_core::{Converter, FnConverter, TypeName, Value};
///
/// let upper = FnConverter::new(|source, _target| {
///     Ok(Value::from(source.to_string().to_uppercase()))
/// });
/// let out = upper.convert_to(&Value::from("abc"), TypeName::String).unwrap();
/// assert_eq!(out, Value::from("ABC"));
/// ```
pub struct FnConverter<F> {
    f: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&Value, &TypeDescriptor) -> Result<Value, ConversionError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&Value, &TypeDescriptor) -> Result<Value, ConversionError> + Send + Sync,
{
    fn convert(&self, source: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        (self.f)(source, target)
    }
}

// ============================================================================
// Source / target capabilities
// ============================================================================

/// Declares which source values a converter accepts.
pub trait AcceptsSourceKind {
    /// Description of the accepted source kinds, for error messages.
    fn expected_source(&self) -> String;

    /// Whether `source` is accepted.
    fn accepts_source(&self, source: &Value) -> bool;

    /// Reject an unaccepted source with
    /// [`ConversionError::SourceTypeUnsupported`].
    fn check_source(&self, source: &Value) -> Result<(), ConversionError> {
        if self.accepts_source(source) {
            Ok(())
        } else {
            Err(ConversionError::source_unsupported(
                self.expected_source(),
                source.runtime_type(),
            ))
        }
    }
}

/// Declares which target descriptors a converter produces.
pub trait AcceptsTargetKind {
    /// Description of the accepted targets, for error messages.
    fn expected_target(&self) -> String;

    /// Whether `target` is accepted.
    fn accepts_target(&self, target: &TypeDescriptor) -> bool;

    /// Reject an unaccepted target with
    /// [`ConversionError::TargetTypeUnsupported`].
    fn check_target(&self, target: &TypeDescriptor) -> Result<(), ConversionError> {
        if self.accepts_target(target) {
            Ok(())
        } else {
            Err(ConversionError::target_unsupported(
                self.expected_target(),
                target,
            ))
        }
    }
}

// ============================================================================
// String sources
// ============================================================================

/// A converter whose source must be a string.
pub trait StringSourceConverter {
    /// Convert an already validated string source.
    fn convert_str(&self, source: &str, target: &TypeDescriptor) -> Result<Value, ConversionError>;

    /// Validate the source is a string, then delegate to
    /// [`StringSourceConverter::convert_str`].
    fn convert_string_source(
        &self,
        source: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        self.check_source(source)?;
        match source {
            Value::String(s) => self.convert_str(s, target),
            other => Err(ConversionError::source_unsupported(
                "String",
                other.runtime_type(),
            )),
        }
    }
}

impl<T: StringSourceConverter + ?Sized> AcceptsSourceKind for T {
    fn expected_source(&self) -> String {
        TypeName::String.to_string()
    }

    fn accepts_source(&self, source: &Value) -> bool {
        matches!(source, Value::String(_))
    }
}

// ============================================================================
// Simple targets
// ============================================================================

/// A converter that only ever targets plain nominal types.
///
/// Parameterized and array descriptors are rejected with
/// [`ConversionError::TargetTypeUnsupported`].
pub trait ClassTargetConverter {
    /// Description of the accepted nominal types, for error messages.
    fn expected_class(&self) -> String;

    /// Whether this converter produces `target`.
    fn accepts_class(&self, target: &TypeName) -> bool;

    /// Convert into an already validated nominal type.
    fn convert_class(&self, source: &Value, target: &TypeName) -> Result<Value, ConversionError>;

    /// Validate the target, then delegate to
    /// [`ClassTargetConverter::convert_class`].
    fn convert_class_target(
        &self,
        source: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        self.check_target(target)?;
        match target {
            TypeDescriptor::Simple(name) => self.convert_class(source, name),
            other => Err(ConversionError::target_unsupported(
                self.expected_class(),
                other,
            )),
        }
    }
}

impl<T: ClassTargetConverter + ?Sized> AcceptsTargetKind for T {
    fn expected_target(&self) -> String {
        self.expected_class()
    }

    fn accepts_target(&self, target: &TypeDescriptor) -> bool {
        match target {
            TypeDescriptor::Simple(name) => self.accepts_class(name),
            _ => false,
        }
    }
}

/// A converter producing exactly one numeric kind.
pub trait NumberConverter {
    /// The numeric kind this converter produces.
    fn expected(&self) -> NumericKind;

    /// Convert the source into the expected numeric kind.
    fn convert_number(&self, source: &Value) -> Result<Value, ConversionError>;

    /// Whether `target` is the primitive or boxed form of the expected kind.
    fn is_expected(&self, target: &TypeName) -> bool {
        NumericKind::of(target) == Some(self.expected())
    }
}

/// A converter producing booleans.
pub trait BooleanConverter {
    fn convert_bool(&self, source: &Value) -> Result<bool, ConversionError>;

    /// Whether `target` is the primitive or boxed boolean type.
    fn is_boolean(&self, target: &TypeName) -> bool {
        target.is_kind(PrimitiveKind::Bool)
    }
}

// ============================================================================
// Container targets
// ============================================================================

/// A resolved container conversion target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerTarget {
    /// A growable collection and its optional element type.
    Collection {
        container: TypeName,
        element: Option<TypeDescriptor>,
    },
    /// A fixed-size array of `component`.
    Array { component: TypeDescriptor },
}

impl ContainerTarget {
    /// Resolve a collection target (no arrays).
    ///
    /// Accepts a bare container (`List`) or a container with at most one
    /// element type argument (`List<Int32>`).
    pub fn resolve_collection(target: &TypeDescriptor) -> Result<Self, ConversionError> {
        match target {
            TypeDescriptor::Simple(name) if name.is_collection_like() => {
                Ok(ContainerTarget::Collection {
                    container: name.clone(),
                    element: None,
                })
            }
            TypeDescriptor::Parameterized(p) if p.raw().is_collection_like() => {
                let element = match p.type_arguments() {
                    [] => None,
                    [element] => Some(element.clone()),
                    arguments => {
                        return Err(ConversionError::failed(format!(
                            "at most one element type supported, but '{target}' has {}",
                            arguments.len()
                        )));
                    }
                };
                Ok(ContainerTarget::Collection {
                    container: p.raw().clone(),
                    element,
                })
            }
            other => Err(ConversionError::target_unsupported(
                "collection type (simple, or parameterized by one element type)",
                other,
            )),
        }
    }

    /// Resolve a collection or array target.
    pub fn resolve(target: &TypeDescriptor) -> Result<Self, ConversionError> {
        match target {
            TypeDescriptor::Array(component) => Ok(ContainerTarget::Array {
                component: (**component).clone(),
            }),
            TypeDescriptor::Simple(TypeName::Array(component)) => Ok(ContainerTarget::Array {
                component: TypeDescriptor::Simple((**component).clone()),
            }),
            other => Self::resolve_collection(other),
        }
    }

    /// Element type of the target, if one was given.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            ContainerTarget::Collection { element, .. } => element.as_ref(),
            ContainerTarget::Array { component } => Some(component),
        }
    }
}

/// A converter producing collections (lists, sets, and concrete containers).
pub trait CollectionTargetConverter {
    /// Convert into `container` with elements of type `element`.
    ///
    /// `element` is `None` for bare container targets; implementors decide the
    /// default element type.
    fn convert_collection(
        &self,
        source: &Value,
        container: &TypeName,
        element: Option<&TypeDescriptor>,
    ) -> Result<Value, ConversionError>;

    /// Resolve the target, then delegate to
    /// [`CollectionTargetConverter::convert_collection`].
    fn convert_collection_target(
        &self,
        source: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        match ContainerTarget::resolve_collection(target)? {
            ContainerTarget::Collection { container, element } => {
                self.convert_collection(source, &container, element.as_ref())
            }
            ContainerTarget::Array { .. } => Err(ConversionError::target_unsupported(
                "collection type",
                target,
            )),
        }
    }
}

/// A converter producing any element container, arrays included.
pub trait ElementContainerTargetConverter {
    /// Convert into the resolved container target.
    fn convert_elements(
        &self,
        source: &Value,
        target: &ContainerTarget,
    ) -> Result<Value, ConversionError>;

    /// Resolve the target, then delegate to
    /// [`ElementContainerTargetConverter::convert_elements`].
    fn convert_element_container_target(
        &self,
        source: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let resolved = ContainerTarget::resolve(target)?;
        self.convert_elements(source, &resolved)
    }
}
