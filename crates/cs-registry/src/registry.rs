//! `Registry<K>` — the type-name → factory table.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::{ElementFactory, ElementKind};

/// Binding table from entity type names to product factories.
///
/// Built once during initialization (built-ins first, then plugins) and read
/// thereafter.  Callers own the registry and pass it explicitly; there is no
/// process-wide instance.
pub struct Registry<K: ElementKind> {
    factories:      HashMap<String, Box<dyn ElementFactory<K::Product>>>,
    builtins_added: bool,
    _kind:          PhantomData<fn() -> K>,
}

impl<K: ElementKind> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ElementKind> Registry<K> {
    /// An empty registry: every lookup yields the default product.
    pub fn new() -> Self {
        Self {
            factories:      HashMap::new(),
            builtins_added: false,
            _kind:          PhantomData,
        }
    }

    /// A registry pre-populated with the core's built-ins.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.add_builtins();
        registry
    }

    /// Register the built-in implementations.
    ///
    /// Must run before plugins register so that plugin bindings shadow the
    /// built-ins.  Calling it again is a no-op, which keeps a second call
    /// from undoing plugin overrides.
    pub fn add_builtins(&mut self) {
        if self.builtins_added {
            return;
        }
        self.builtins_added = true;
        K::add_builtins(self);
        log::debug!("{} registry: {} built-ins", K::element_name(), self.factories.len());
    }

    /// Bind `key_type_name` to `factory`, replacing any earlier binding.
    ///
    /// Returns `true` if an earlier binding was replaced.
    pub fn register_element<F>(&mut self, key_type_name: impl Into<String>, factory: F) -> bool
    where
        F: ElementFactory<K::Product>,
    {
        self.bind(key_type_name.into(), Box::new(factory))
    }

    /// Move every binding of `other` into `self`, replacing on collision.
    ///
    /// Only bindings move; `other`'s built-in flag is ignored.
    pub fn merge(&mut self, other: Registry<K>) {
        let mut bindings: Vec<_> = other.factories.into_iter().collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        for (name, factory) in bindings {
            self.bind(name, factory);
        }
    }

    fn bind(&mut self, name: String, factory: Box<dyn ElementFactory<K::Product>>) -> bool {
        let replaced = self.factories.insert(name.clone(), factory).is_some();
        if replaced {
            log::info!("{} for {name:?} overridden", K::element_name());
        } else {
            log::debug!("{} for {name:?} registered", K::element_name());
        }
        replaced
    }

    /// Construct the product bound to `key_type_name`, or the default product.
    pub fn get_element(&self, key_type_name: &str) -> Box<K::Product> {
        match self.factories.get(key_type_name) {
            Some(factory) => factory.construct(),
            None => {
                log::warn!(
                    "no {} registered for {key_type_name:?}, using default",
                    K::element_name()
                );
                K::default_element()
            }
        }
    }

    /// Construct the product bound to `key`'s type.
    pub fn get_element_for(&self, key: &K::Key) -> Box<K::Product> {
        self.get_element(K::key_type_name(key))
    }

    /// The fallback product.
    pub fn get_default_element(&self) -> Box<K::Product> {
        K::default_element()
    }

    /// Product-kind name for diagnostics.
    pub fn element_name(&self) -> &'static str {
        K::element_name()
    }

    /// `true` if `key_type_name` has an explicit binding.
    pub fn contains(&self, key_type_name: &str) -> bool {
        self.factories.contains_key(key_type_name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Bound type names, sorted.
    pub fn key_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
