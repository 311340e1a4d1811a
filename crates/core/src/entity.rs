//! Identity of catalog entries.

/// Anything addressed by a stable identifier that survives edits.
///
/// Stores look entries up and detect duplicates through `id`; every other
/// field may change through an update.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
