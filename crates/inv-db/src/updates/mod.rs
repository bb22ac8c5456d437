//! Input and update builder types for entity mutations.
//!
//! `New*` types carry the fields needed to create a row. Update structs have
//! `Option` fields: only `Some` fields generate SET clauses in the dynamic
//! UPDATE SQL, and `Some(None)` clears a nullable column.

pub mod device;
pub mod part;
