//! TUI widgets for IntelliSQL.
//!
//! Contains the header, navigation, screens and reusable components.

pub mod about;
pub mod header;
pub mod home;
pub mod input;
pub mod query;
pub mod sidebar;
pub mod table;
