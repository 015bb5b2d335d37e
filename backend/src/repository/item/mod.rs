//! Menu Item Repository Module
//!
//! This module provides item repository functionality split into specialized sub-modules:
//! - item_repo: Core CRUD operations
//! - item_hierarchy: Hierarchy operations (children, move)
//! - item_positioning: Position management (next position, reindex, reorder)

mod item_repo;
mod item_hierarchy;
mod item_positioning;

pub use item_repo::MenuItemRepository;

// Re-export all operation traits so they can be used by importing MenuItemRepository
pub use item_hierarchy::ItemHierarchyOperations;
pub use item_positioning::ItemPositioningOperations;
