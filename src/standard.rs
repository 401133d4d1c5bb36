//! The standard converter set.

use std::sync::Arc;

use typeconv_core::{PrimitiveKind, TypeDescriptor, TypeName, Value};
use typeconv_registry::{Dispatcher, DispatcherHandle, SharedConverter};

use crate::converters::{
    AnythingToStringConverter, StringToArrayConverter, StringToBigNumberConverter,
    StringToBooleanConverter, StringToCollectionConverter, StringToNumberConverter,
    StringToTimeConverter,
};

/// Locator id of the string to collection converter.
pub const STRING_TO_COLLECTION: &str = "string-to-collection";
/// Locator id of the string to array converter.
pub const STRING_TO_ARRAY: &str = "string-to-array";
/// Locator id of the anything to string converter.
pub const ANYTHING_TO_STRING: &str = "anything-to-string";

/// Register every shipped converter on `dispatcher`.
///
/// Exact tier:
/// - `String` to each numeric kind, primitive and boxed
/// - `String` to `bool`/`Bool`
/// - `String` to `Date`, `Time` and `DateTime`
/// - `String` to `BigInteger` and `BigDecimal`
///
/// Predicate tier, in priority order:
/// - [`STRING_TO_COLLECTION`]: string sources with a `List`, `Set` or
///   `Collection` target, with or without an element type
/// - [`STRING_TO_ARRAY`]: string sources with an array target
/// - [`ANYTHING_TO_STRING`]: any source with a `String` target
///
/// Container converters convert their delegated elements through `elements`.
pub fn register_standard_converters(dispatcher: &mut Dispatcher, elements: DispatcherHandle) {
    let registry = dispatcher.registry_mut();

    for converter in StringToNumberConverter::all() {
        let primitive = converter.kind().primitive();
        let shared: SharedConverter = Arc::new(converter);
        registry.register(
            TypeName::String,
            TypeName::Primitive(primitive),
            Arc::clone(&shared),
        );
        registry.register(TypeName::String, TypeName::Boxed(primitive), shared);
    }

    let boolean: SharedConverter = Arc::new(StringToBooleanConverter);
    registry.register(
        TypeName::String,
        TypeName::Primitive(PrimitiveKind::Bool),
        Arc::clone(&boolean),
    );
    registry.register(TypeName::String, TypeName::Boxed(PrimitiveKind::Bool), boolean);

    let time: SharedConverter = Arc::new(StringToTimeConverter::new());
    for target in [TypeName::Date, TypeName::Time, TypeName::DateTime] {
        registry.register(TypeName::String, target, Arc::clone(&time));
    }

    let big: SharedConverter = Arc::new(StringToBigNumberConverter);
    for target in StringToBigNumberConverter::TARGETS {
        registry.register(TypeName::String, target, Arc::clone(&big));
    }

    let locator = dispatcher.locator_mut();
    locator.register(
        STRING_TO_COLLECTION,
        Arc::new(StringToCollectionConverter::new().with_dispatcher_source(elements.clone())),
        |source: &Value, target: &TypeDescriptor| {
            source.as_str().is_some()
                && matches!(
                    target.erasure(),
                    TypeName::List | TypeName::Set | TypeName::Collection
                )
        },
    );
    locator.register(
        STRING_TO_ARRAY,
        Arc::new(StringToArrayConverter::new().with_dispatcher_source(elements)),
        |source: &Value, target: &TypeDescriptor| {
            source.as_str().is_some() && target.erasure().array_component().is_some()
        },
    );
    locator.register(
        ANYTHING_TO_STRING,
        Arc::new(AnythingToStringConverter),
        |_: &Value, target: &TypeDescriptor| target.erasure() == TypeName::String,
    );
}

/// A dispatcher with every shipped converter registered.
///
/// Container converters convert their elements through the returned
/// dispatcher itself, so `"1, 2"` into `List<Int32[]>` or `Set<Date>` works
/// without further setup. The container converters hold only a weak handle,
/// so dropping the last `Arc` frees the dispatcher.
///
/// ```
/// use typeconv::standard_dispatcher;
/// use typeconv_core::{TypeDescriptor, TypeName, Value};
///
/// let dispatcher = standard_dispatcher();
/// let out = dispatcher
///     .convert(&Value::from("true, false"), &TypeDescriptor::list_of(TypeName::boxed(
///         typeconv_core::PrimitiveKind::Bool,
///     )))
///     .unwrap();
/// assert_eq!(out, Value::list([Value::Bool(true), Value::Bool(false)]));
/// ```
pub fn standard_dispatcher() -> Arc<Dispatcher> {
    standard_dispatcher_with(|_| {})
}

/// [`standard_dispatcher`] plus caller registrations.
///
/// `configure` runs on the dispatcher after the shipped converters are
/// registered and before it is shared, so converters it adds are also
/// reachable as container elements.
///
/// ```
/// use std::sync::Arc;
/// use typeconv::standard_dispatcher_with;
/// use typeconv_core::{FnConverter, TypeDescriptor, TypeName, Value};
///
/// let dispatcher = standard_dispatcher_with(|dispatcher| {
///     dispatcher.registry_mut().register(
///         TypeName::String,
///         TypeName::named("Upper"),
///         Arc::new(FnConverter::new(|source, _| {
///             Ok(Value::from(source.to_string().to_uppercase()))
///         })),
///     );
/// });
/// let out = dispatcher
///     .convert(&Value::from("a, b"), &TypeDescriptor::list_of(TypeName::named("Upper")))
///     .unwrap();
/// assert_eq!(out, Value::list([Value::from("A"), Value::from("B")]));
/// ```
pub fn standard_dispatcher_with(configure: impl FnOnce(&mut Dispatcher)) -> Arc<Dispatcher> {
    Arc::new_cyclic(|dispatcher| {
        let mut standard = Dispatcher::new();
        register_standard_converters(&mut standard, DispatcherHandle::Weak(dispatcher.clone()));
        configure(&mut standard);
        standard
    })
}
