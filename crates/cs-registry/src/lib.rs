//! `cs-registry` — binds pluggable implementations to model entity types.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`kind`]     | `ElementKind` trait — one impl per registry instantiation    |
//! | [`factory`]  | `ElementFactory<P>` — `construct() -> Box<P>`                |
//! | [`registry`] | `Registry<K>` — name → factory table with total lookup       |
//!
//! # Lookup contract
//!
//! ```text
//! get_element(name):
//!   name bound      → product from the most recent factory for name
//!   name not bound  → K::default_element(), with a warning naming
//!                     K::element_name() and name
//! ```
//!
//! Lookups never fail.  A plugin can introduce a new entity type and a
//! matching implementation, or shadow a built-in, purely by registering a
//! factory under the entity's type name; the core never enumerates type
//! names itself.

pub mod factory;
pub mod kind;
pub mod registry;


pub use factory::ElementFactory;
pub use kind::ElementKind;
pub use registry::Registry;
