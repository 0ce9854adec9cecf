//! Shared gitea-line data models consumed by the core library and host crates.

pub mod action;
pub mod permalink;
pub mod repository;

pub use action::*;
pub use permalink::*;
pub use repository::*;
