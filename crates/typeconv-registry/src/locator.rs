//! ConverterLocator - the predicate-match dispatch tier.
//!
//! An ordered list of `(predicate, converter)` entries. Lookup walks the list
//! in registration order and returns the converter of the first predicate
//! that accepts `(source, target)`, so registration order is match priority.
//!
//! This tier handles everything the exact-match registry cannot key on, such
//! as every `List<E>` regardless of `E` or every array target.

use std::fmt;
use std::sync::Arc;

use typeconv_core::{TypeDescriptor, Value};

use crate::SharedConverter;

/// Applicability check for a locator entry.
pub type Predicate = Arc<dyn Fn(&Value, &TypeDescriptor) -> bool + Send + Sync>;

#[derive(Clone)]
struct LocatorEntry {
    id: String,
    converter: SharedConverter,
    predicate: Predicate,
}

/// Ordered predicate-matched converter storage.
#[derive(Default, Clone)]
pub struct ConverterLocator {
    entries: Vec<LocatorEntry>,
}

impl ConverterLocator {
    /// Create an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the converter of the first entry whose predicate accepts
    /// `(source, target)`.
    pub fn lookup(&self, source: &Value, target: &TypeDescriptor) -> Option<&SharedConverter> {
        self.entries
            .iter()
            .find(|entry| (entry.predicate)(source, target))
            .map(|entry| &entry.converter)
    }

    /// Id of the entry [`ConverterLocator::lookup`] would pick.
    pub fn lookup_id(&self, source: &Value, target: &TypeDescriptor) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| (entry.predicate)(source, target))
            .map(|entry| entry.id.as_str())
    }

    /// Register a converter under `id`.
    ///
    /// A new id is appended at the lowest priority. An existing id keeps its
    /// position; its converter and predicate are replaced and the previous
    /// converter is returned.
    pub fn register<P>(
        &mut self,
        id: impl Into<String>,
        converter: SharedConverter,
        predicate: P,
    ) -> Option<SharedConverter>
    where
        P: Fn(&Value, &TypeDescriptor) -> bool + Send + Sync + 'static,
    {
        let id = id.into();
        let predicate: Predicate = Arc::new(predicate);
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.predicate = predicate;
                Some(std::mem::replace(&mut entry.converter, converter))
            }
            None => {
                self.entries.push(LocatorEntry {
                    id,
                    converter,
                    predicate,
                });
                None
            }
        }
    }

    /// Remove the entry registered under `id`, returning its converter.
    ///
    /// The relative order of the remaining entries is unchanged.
    pub fn unregister(&mut self, id: &str) -> Option<SharedConverter> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).converter)
    }

    /// Whether an entry is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Registered ids in priority order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ConverterLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterLocator")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeconv_core::{Converter, FnConverter, TypeName};

    fn constant(value: &'static str) -> SharedConverter {
        Arc::new(FnConverter::new(move |_, _| Ok(Value::from(value))))
    }

    fn any_list(_: &Value, target: &TypeDescriptor) -> bool {
        target.erasure() == TypeName::List
    }

    fn run(converter: &SharedConverter) -> Value {
        converter
            .convert(&Value::from("x"), &TypeDescriptor::list_of(TypeName::String))
            .unwrap()
    }

    #[test]
    fn empty_locator_finds_nothing() {
        let locator = ConverterLocator::new();
        assert!(locator.is_empty());
        assert!(locator
            .lookup(&Value::from("x"), &TypeDescriptor::simple(TypeName::String))
            .is_none());
    }

    #[test]
    fn first_matching_predicate_wins() {
        let mut locator = ConverterLocator::new();
        locator.register("first", constant("first"), any_list);
        locator.register("second", constant("second"), any_list);

        let target = TypeDescriptor::list_of(TypeName::String);
        let found = locator.lookup(&Value::from("x"), &target).unwrap();
        assert_eq!(run(found), Value::from("first"));
        assert_eq!(locator.lookup_id(&Value::from("x"), &target), Some("first"));
    }

    #[test]
    fn non_matching_predicates_are_skipped() {
        let mut locator = ConverterLocator::new();
        locator.register("never", constant("never"), |_: &Value, _: &TypeDescriptor| false);
        locator.register("lists", constant("lists"), any_list);

        let found = locator
            .lookup(&Value::from("x"), &TypeDescriptor::list_of(TypeName::String))
            .unwrap();
        assert_eq!(run(found), Value::from("lists"));
        assert!(locator
            .lookup(&Value::from("x"), &TypeDescriptor::set_of(TypeName::String))
            .is_none());
    }

    #[test]
    fn predicate_sees_source_value() {
        let mut locator = ConverterLocator::new();
        locator.register("strings", constant("strings"), |source: &Value, _: &TypeDescriptor| {
            source.as_str().is_some()
        });

        let target = TypeDescriptor::simple(TypeName::named("Anything"));
        assert!(locator.lookup(&Value::from("x"), &target).is_some());
        assert!(locator.lookup(&Value::from(1i32), &target).is_none());
    }

    #[test]
    fn reregistering_keeps_priority_and_returns_previous() {
        let mut locator = ConverterLocator::new();
        let original = constant("a1");
        locator.register("a", original.clone(), any_list);
        locator.register("b", constant("b"), any_list);

        let previous = locator.register("a", constant("a2"), any_list).unwrap();
        assert!(Arc::ptr_eq(&previous, &original));
        assert_eq!(locator.ids().collect::<Vec<_>>(), vec!["a", "b"]);

        let found = locator
            .lookup(&Value::from("x"), &TypeDescriptor::list_of(TypeName::String))
            .unwrap();
        assert_eq!(run(found), Value::from("a2"));
    }

    #[test]
    fn unregister_preserves_order() {
        let mut locator = ConverterLocator::new();
        locator.register("a", constant("a"), any_list);
        locator.register("b", constant("b"), any_list);
        locator.register("c", constant("c"), any_list);

        let removed = locator.unregister("a").unwrap();
        assert_eq!(run(&removed), Value::from("a"));
        assert!(locator.unregister("a").is_none());
        assert!(!locator.contains("a"));
        assert_eq!(locator.ids().collect::<Vec<_>>(), vec!["b", "c"]);

        let found = locator
            .lookup(&Value::from("x"), &TypeDescriptor::list_of(TypeName::String))
            .unwrap();
        assert_eq!(run(found), Value::from("b"));
    }
}
