//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod menu_repo;
mod item;


pub use traits::Repository;
pub use db::{init_db, DbState, SharedConnection};
pub use menu_repo::MenuRepository;
pub use item::{MenuItemRepository, ItemHierarchyOperations, ItemPositioningOperations};
