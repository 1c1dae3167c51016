//! The `ElementKind` trait — what a particular registry stores and keys on.

use crate::Registry;

/// Parameterizes a [`Registry`] by product type and key type.
///
/// Each registry flavor (goal renderers, …) is a zero-sized marker type that
/// implements this trait.  The associated functions play the role of the
/// per-flavor specializations: the default product, the built-in set, and the
/// product-kind name used in diagnostics.
pub trait ElementKind: Sized + 'static {
    /// The pluggable implementation, usually a trait object.
    type Product: ?Sized + 'static;

    /// The model entity a product is bound to.
    type Key: ?Sized;

    /// Type identifier of `key`: the name products are registered under.
    fn key_type_name(key: &Self::Key) -> &str;

    /// Human-readable product-kind name, e.g. `"goal renderer"`.
    fn element_name() -> &'static str;

    /// Fallback product for unbound type names.
    fn default_element() -> Box<Self::Product>;

    /// Register the implementations shipped with the core.
    fn add_builtins(registry: &mut Registry<Self>);
}
