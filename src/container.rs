//! Shared machinery for string to container conversion.
//!
//! Converting `"1, 2 ,3"` into a container happens in four steps:
//!
//! 1. [`split_elements`] cuts the source at each comma, consuming at most one
//!    space on either side of it.
//! 2. [`ElementResolver`] picks how each token becomes an element: kept as a
//!    string, parsed as a number directly, or handed to a dispatcher.
//! 3. The container is built: `List` and `Set` directly, any other container
//!    name through [`ContainerFactories`].
//! 4. Elements are added in token order.
//!
//! Any failing element fails the whole conversion; no partial container is
//! returned.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use typeconv_core::{ConversionError, NumericKind, TypeDescriptor, TypeName, Value};
use typeconv_registry::{Dispatcher, DispatcherHandle};

use crate::converters::parse_number;

/// Element delimiter: a comma with at most one space on either side.
static SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" ?, ?").expect("element delimiter pattern"));

/// Split a container source string into element tokens.
///
/// The delimiter is a comma with at most one optional space on each side.
/// Other whitespace stays part of the token. Trailing empty tokens are
/// dropped, and a source without any delimiter is a single token (so `""`
/// yields `[""]`).
///
/// ```
/// use typeconv::split_elements;
///
/// assert_eq!(split_elements("1, 2 ,3"), vec!["1", "2", "3"]);
/// assert_eq!(split_elements("a  ,b"), vec!["a ", "b"]);
/// assert_eq!(split_elements("a,b,"), vec!["a", "b"]);
/// ```
pub fn split_elements(source: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = SPLIT.split(source).collect();
    if tokens.len() > 1 {
        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }
    }
    tokens
}

/// How a token becomes an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// The token itself, as a string.
    Identity,
    /// The token parsed as a number, without a dispatcher.
    Numeric(NumericKind),
    /// The token converted by a dispatcher.
    Delegated(TypeDescriptor),
}

impl ElementKind {
    /// Classify an element type.
    ///
    /// No element type, `Object` and `String` keep tokens as strings. The
    /// six numeric kinds (primitive or boxed) are parsed directly. Everything
    /// else is delegated.
    pub fn of(element: Option<&TypeDescriptor>) -> Self {
        let Some(element) = element else {
            return ElementKind::Identity;
        };
        match element {
            TypeDescriptor::Simple(TypeName::Object | TypeName::String) => ElementKind::Identity,
            TypeDescriptor::Simple(name) => match NumericKind::of(name) {
                Some(kind) => ElementKind::Numeric(kind),
                None => ElementKind::Delegated(element.clone()),
            },
            other => ElementKind::Delegated(other.clone()),
        }
    }
}

/// Converts tokens into elements of one element type.
pub struct ElementResolver {
    kind: ElementKind,
    dispatcher: Option<Arc<Dispatcher>>,
}

impl ElementResolver {
    /// Resolve the element strategy for `element`.
    ///
    /// The dispatcher is only resolved for delegated elements.
    ///
    /// # Errors
    ///
    /// [`ConversionError::NoSuchConverter`] if elements need a dispatcher and
    /// `handle` has none.
    pub fn new(
        element: Option<&TypeDescriptor>,
        handle: &DispatcherHandle,
    ) -> Result<Self, ConversionError> {
        let kind = ElementKind::of(element);
        let dispatcher = match &kind {
            ElementKind::Delegated(target) => Some(handle.resolve().ok_or_else(|| {
                ConversionError::no_such_converter(TypeName::String, target)
            })?),
            ElementKind::Identity | ElementKind::Numeric(_) => None,
        };
        Ok(Self { kind, dispatcher })
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Convert one token.
    pub fn convert(&self, token: &str) -> Result<Value, ConversionError> {
        match (&self.kind, &self.dispatcher) {
            (ElementKind::Identity, _) => Ok(Value::from(token)),
            (ElementKind::Numeric(kind), _) => parse_number(token, *kind),
            (ElementKind::Delegated(target), Some(dispatcher)) => {
                dispatcher.convert(&Value::from(token), target)
            }
            (ElementKind::Delegated(target), None) => {
                Err(ConversionError::no_such_converter(TypeName::String, target))
            }
        }
    }

    /// Convert every token, stopping at the first failure.
    pub fn convert_all(&self, tokens: &[&str]) -> Result<Vec<Value>, ConversionError> {
        tokens.iter().map(|token| self.convert(token)).collect()
    }
}

impl fmt::Debug for ElementResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementResolver")
            .field("kind", &self.kind)
            .field("has_dispatcher", &self.dispatcher.is_some())
            .finish()
    }
}

/// Zero-argument constructor of an empty container value.
pub type ContainerFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Constructors for container names other than `List` and `Set`.
#[derive(Default, Clone)]
pub struct ContainerFactories {
    factories: FxHashMap<TypeName, ContainerFactory>,
}

impl ContainerFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for `container`, returning the previous one.
    pub fn register<F>(&mut self, container: TypeName, factory: F) -> Option<ContainerFactory>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.factories.insert(container, Arc::new(factory))
    }

    pub fn unregister(&mut self, container: &TypeName) -> Option<ContainerFactory> {
        self.factories.remove(container)
    }

    pub fn contains(&self, container: &TypeName) -> bool {
        self.factories.contains_key(container)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build an empty container able to hold `capacity` elements.
    ///
    /// `List` and `Set` are built directly and pre-sized. Other names use
    /// their registered constructor.
    ///
    /// # Errors
    ///
    /// [`ConversionError::ConversionFailed`] if no constructor is registered
    /// for `container`, or the constructor does not produce a list or set.
    pub fn create(&self, container: &TypeName, capacity: usize) -> Result<Value, ConversionError> {
        match container {
            TypeName::List => Ok(Value::List(Vec::with_capacity(capacity))),
            TypeName::Set => Ok(Value::Set(FxHashSet::with_capacity_and_hasher(
                capacity,
                FxBuildHasher,
            ))),
            other => {
                let factory = self.factories.get(other).ok_or_else(|| {
                    ConversionError::failed(format!(
                        "cannot create an instance of container type {other}: no constructor registered"
                    ))
                })?;
                let created = factory();
                if created.is_element_container() {
                    Ok(created)
                } else {
                    Err(ConversionError::failed(format!(
                        "cannot create an instance of container type {other}: constructor produced {}",
                        created.runtime_type()
                    )))
                }
            }
        }
    }
}

impl fmt::Debug for ContainerFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.factories.keys().map(ToString::to_string).collect();
        names.sort();
        f.debug_struct("ContainerFactories")
            .field("containers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeconv_core::{FnConverter, OrderedFloat, PrimitiveKind};

    #[test]
    fn split_tolerates_one_space_around_commas() {
        let expected = vec!["1", "2", "3"];
        assert_eq!(split_elements("1,2,3"), expected);
        assert_eq!(split_elements("1, 2, 3"), expected);
        assert_eq!(split_elements("1 ,2, 3"), expected);
        assert_eq!(split_elements("1 , 2 , 3"), expected);
    }

    #[test]
    fn split_keeps_extra_whitespace() {
        assert_eq!(split_elements("a  ,  b"), vec!["a ", " b"]);
        assert_eq!(split_elements(" a,b "), vec![" a", "b "]);
        assert_eq!(split_elements("a b,c"), vec!["a b", "c"]);
    }

    #[test]
    fn split_empty_tokens() {
        assert_eq!(split_elements(""), vec![""]);
        assert_eq!(split_elements("abc"), vec!["abc"]);
        assert_eq!(split_elements(",a"), vec!["", "a"]);
        assert_eq!(split_elements("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_elements("a, ,b"), vec!["a", "", "b"]);
        assert_eq!(split_elements("a ,, b"), vec!["a", "", "b"]);
        assert_eq!(split_elements("a, "), vec!["a"]);
        assert_eq!(split_elements("a,b,,"), vec!["a", "b"]);
        assert!(split_elements(",").is_empty());
    }

    #[test]
    fn split_non_ascii() {
        assert_eq!(split_elements("ä, ö ,ü"), vec!["ä", "ö", "ü"]);
    }

    #[test]
    fn element_kinds() {
        assert_eq!(ElementKind::of(None), ElementKind::Identity);
        assert_eq!(
            ElementKind::of(Some(&TypeDescriptor::simple(TypeName::Object))),
            ElementKind::Identity
        );
        assert_eq!(
            ElementKind::of(Some(&TypeDescriptor::simple(TypeName::String))),
            ElementKind::Identity
        );
        assert_eq!(
            ElementKind::of(Some(&TypeDescriptor::from(PrimitiveKind::Int16))),
            ElementKind::Numeric(NumericKind::Int16)
        );
        assert_eq!(
            ElementKind::of(Some(&TypeDescriptor::simple(TypeName::Boxed(
                PrimitiveKind::Float64
            )))),
            ElementKind::Numeric(NumericKind::Float64)
        );

        let boolean = TypeDescriptor::simple(TypeName::Boxed(PrimitiveKind::Bool));
        assert_eq!(
            ElementKind::of(Some(&boolean)),
            ElementKind::Delegated(boolean.clone())
        );
        let nested = TypeDescriptor::list_of(TypeName::String);
        assert_eq!(
            ElementKind::of(Some(&nested)),
            ElementKind::Delegated(nested.clone())
        );
    }

    #[test]
    fn numeric_elements_skip_the_dispatcher() {
        let resolver = ElementResolver::new(
            Some(&TypeDescriptor::simple(TypeName::Boxed(PrimitiveKind::Float32))),
            &DispatcherHandle::Detached,
        )
        .unwrap();
        assert_eq!(
            resolver.convert("1.5").unwrap(),
            Value::Float32(OrderedFloat(1.5))
        );
    }

    #[test]
    fn delegated_elements_need_a_dispatcher() {
        let target = TypeDescriptor::simple(TypeName::Date);
        let err = ElementResolver::new(Some(&target), &DispatcherHandle::Detached).unwrap_err();
        assert!(err.is_no_such_converter());
        assert_eq!(err.to_string(), "no converter found from 'String' to 'Date'");
    }

    #[test]
    fn delegated_elements_use_the_dispatcher() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.registry_mut().register(
            TypeName::String,
            TypeName::Date,
            Arc::new(FnConverter::new(|source, _| {
                Ok(Value::from(format!("date:{source}")))
            })),
        );
        let handle = DispatcherHandle::from(Arc::new(dispatcher));
        let resolver =
            ElementResolver::new(Some(&TypeDescriptor::simple(TypeName::Date)), &handle).unwrap();
        assert_eq!(
            resolver.convert_all(&["a", "b"]).unwrap(),
            vec![Value::from("date:a"), Value::from("date:b")]
        );
    }

    #[test]
    fn first_failing_element_fails_all() {
        let resolver = ElementResolver::new(
            Some(&TypeDescriptor::from(PrimitiveKind::Int32)),
            &DispatcherHandle::Detached,
        )
        .unwrap();
        let err = resolver.convert_all(&["1", "x", "3"]).unwrap_err();
        assert!(matches!(err, ConversionError::ConversionFailed { .. }));
    }

    #[test]
    fn factories_build_lists_and_sets_directly() {
        let factories = ContainerFactories::new();
        assert_eq!(
            factories.create(&TypeName::List, 3).unwrap(),
            Value::List(Vec::new())
        );
        assert_eq!(
            factories.create(&TypeName::Set, 3).unwrap(),
            Value::set(Vec::new())
        );
    }

    #[test]
    fn factories_for_other_containers() {
        let mut factories = ContainerFactories::new();
        let linked = TypeName::named("LinkedList");
        let err = factories.create(&linked, 1).unwrap_err();
        assert!(matches!(err, ConversionError::ConversionFailed { .. }));

        factories.register(linked.clone(), || Value::List(Vec::new()));
        assert!(factories.contains(&linked));
        assert_eq!(factories.create(&linked, 1).unwrap(), Value::List(Vec::new()));

        factories.register(TypeName::Collection, || Value::Null);
        let err = factories.create(&TypeName::Collection, 1).unwrap_err();
        assert!(err.to_string().contains("constructor produced null"));
    }
}
