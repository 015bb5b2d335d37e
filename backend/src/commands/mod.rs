//! Commands Layer
//!
//! Handlers behind the UI's `invoke` calls. Errors are flattened to
//! strings at this boundary.

mod menu_cmd;
mod item_cmd;
mod dispatch;

pub use menu_cmd::*;
pub use item_cmd::*;
pub use dispatch::{dispatch, COMMANDS};
