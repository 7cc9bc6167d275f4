//! # Scenario Model
//!
//! The configuration tree describing one API test:
//! `Test → Scenario → Request → Body / Assertions → KeyValue / Text / Regex / ResponseTime`.
//!
//! Every entity is built once from a plain options structure (usually
//! deserialized from JSON, any field may be missing). Construction always
//! runs in the same order: the entity's defaulting hook, then its direct
//! fields, then its typed child lists.

pub mod assertions;
pub mod body;
pub mod request;
pub mod scenario;

pub use assertions::{AssertionKind, Assertions, Regex, RegexSubject, ResponseTime, Text};
pub use body::{Body, BodyType, KeyValue};
pub use request::Request;
pub use scenario::Scenario;
pub use test::{JmxExport, Test};

/// Display identifier for scenarios and requests.
pub type EntityId = u64;

/// State shared by a single model build.
///
/// Identifiers are handed out from a plain counter, so two builds of the
/// same options produce the same ids.
#[derive(Debug, Clone)]
pub struct BuildContext {
    next_id: EntityId,
}

impl BuildContext {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A model entity that can be built from partial options.
pub trait Config: Sized {
    /// Raw, fully optional input for this entity.
    type Options: Default;

    /// Pre-process incoming options before the entity is built, e.g. to
    /// inject a default child.
    fn init_options(options: Self::Options) -> Self::Options {
        options
    }

    /// Build the entity: direct fields first, then child lists.
    fn from_options(options: Self::Options, ctx: &mut BuildContext) -> Self;

    fn is_valid(&self) -> bool {
        true
    }
}

/// Build one entity, running its defaulting hook first.
pub fn construct<T: Config>(options: Option<T::Options>, ctx: &mut BuildContext) -> T {
    let options = T::init_options(options.unwrap_or_default());
    T::from_options(options, ctx)
}

/// Build a child list from raw option elements, preserving order.
pub fn construct_all<T: Config>(raw: Option<Vec<T::Options>>, ctx: &mut BuildContext) -> Vec<T> {
    let mut items = Vec::new();
    for options in raw.unwrap_or_default() {
        items.push(construct::<T>(Some(options), ctx));
    }
    items
}

/// Keep only the entries whose validity predicate holds.
pub fn valid_only<T: Config>(items: &[T]) -> Vec<&T> {
    items.iter().filter(|item| item.is_valid()).collect()
}

/// Treat a missing or empty string as "not set".
pub(crate) fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}
