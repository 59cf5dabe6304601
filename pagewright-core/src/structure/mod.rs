//! Document-level structures built on top of plain objects.

mod destination;
mod name_tree;

pub use destination::Destination;
pub use name_tree::NameTree;
