//! CLI command implementations

pub mod build;
pub mod clean;
pub mod images;
pub mod list;
pub mod new;
