//! Entity Store: typed persistence per record type.
//!
//! Reverse links are derived indices over the children's foreign keys,
//! never stored on the parent. Inserting a child links it and deleting a
//! child unlinks it, with no second write to the parent.

use std::collections::HashMap;

use uuid::Uuid;

pub mod author;
pub mod blog;
pub mod comment;
pub mod user;

/// Group `(parent, child)` pairs into per-parent child lists, keeping input order.
pub(crate) fn group_by_parent(pairs: Vec<(Uuid, Uuid)>) -> HashMap<Uuid, Vec<Uuid>> {
    let mut index: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (parent, child) in pairs {
        index.entry(parent).or_default().push(child);
    }
    index
}

/// Fresh record id. UUIDv7 ids sort by creation time.
pub(crate) fn new_id() -> Uuid {
    Uuid::now_v7()
}
