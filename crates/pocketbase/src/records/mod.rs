//! Record and list-result types.
//!
//! Records are schema-free: a collection's shape is only known to the
//! server, so a [`Record`] is an ordered field mapping with a guaranteed
//! `id`. Typed views are layered on top with [`Record::deserialize_into`].

mod list;
mod record;

pub use list::ListResult;
pub use record::{Expanded, Record};
