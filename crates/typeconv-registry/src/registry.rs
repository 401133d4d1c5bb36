//! ConverterRegistry - the exact-match dispatch tier.
//!
//! Converters are stored in a two-level map keyed by the source value's
//! runtime type and the full target descriptor, so `List` and `List<Int32>`
//! are different keys. Lookup is O(1) and there is no wildcard, erasure or
//! inheritance-aware matching here; anything that needs it belongs in the
//! [`ConverterLocator`](crate::ConverterLocator).
//!
//! # Thread Safety
//!
//! Mutation requires `&mut self`. Callers that need concurrent registration
//! must wrap the registry themselves (e.g. `RwLock`) or work on a clone and
//! swap it in.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use typeconv_core::{FnConverter, PrimitiveKind, TypeDescriptor, TypeName, Value};
//! use typeconv_registry::ConverterRegistry;
//!
//! let mut registry = ConverterRegistry::new();
//! let int32 = TypeDescriptor::simple(TypeName::Boxed(PrimitiveKind::Int32));
//! let previous = registry.register(
//!     TypeName::String,
//!     int32.clone(),
//!     Arc::new(FnConverter::new(|_, _| Ok(Value::Int32(0)))),
//! );
//! assert!(previous.is_none());
//! assert!(registry.lookup(&TypeName::String, &int32).is_some());
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use typeconv_core::{TypeDescriptor, TypeName};

use crate::SharedConverter;

/// Exact-match converter storage keyed by source type name and target
/// descriptor.
#[derive(Default, Clone)]
pub struct ConverterRegistry {
    /// source type -> (target descriptor -> converter)
    coordinates: FxHashMap<TypeName, FxHashMap<TypeDescriptor, SharedConverter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the converter registered for exactly `(source, target)`.
    ///
    /// `None` is not an error; it means "try the next tier".
    pub fn lookup(&self, source: &TypeName, target: &TypeDescriptor) -> Option<&SharedConverter> {
        self.coordinates.get(source)?.get(target)
    }

    /// Register a converter for `(source, target)`.
    ///
    /// A plain [`TypeName`] target registers its `Simple` descriptor.
    /// Overwrites any existing entry and returns it.
    pub fn register(
        &mut self,
        source: TypeName,
        target: impl Into<TypeDescriptor>,
        converter: SharedConverter,
    ) -> Option<SharedConverter> {
        self.coordinates
            .entry(source)
            .or_default()
            .insert(target.into(), converter)
    }

    /// Remove and return the converter for `(source, target)`.
    pub fn unregister(
        &mut self,
        source: &TypeName,
        target: &TypeDescriptor,
    ) -> Option<SharedConverter> {
        let targets = self.coordinates.get_mut(source)?;
        let removed = targets.remove(target);
        if targets.is_empty() {
            self.coordinates.remove(source);
        }
        removed
    }

    /// Whether a converter is registered for `(source, target)`.
    pub fn contains(&self, source: &TypeName, target: &TypeDescriptor) -> bool {
        self.lookup(source, target).is_some()
    }

    /// Number of registered `(source, target)` pairs.
    pub fn len(&self) -> usize {
        self.coordinates.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// All registered `(source, target)` pairs, in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (&TypeName, &TypeDescriptor)> {
        self.coordinates
            .iter()
            .flat_map(|(source, targets)| targets.keys().map(move |target| (source, target)))
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
