//! Home page post browser and reading UI as plain functions
//!
//! The browser script keeps a [`FilterState`], feeds user input through
//! [`FilterState::apply`], builds a [`ListView`] from the posts data module
//! and renders it with [`render`]. State is persisted through a [`Session`]
//! after every render. Nothing here touches a DOM.

pub mod reader;
pub mod render;
mod session;
pub mod share;
mod state;
mod theme;
pub mod tooltip;
mod view;

pub use session::{MemoryStorage, Session, SessionStorage, StorageError, SESSION_KEY};
pub use state::{filter_and_sort, Action, FilterState, SortOrder, TagFilter};
pub use theme::{Theme, THEME_KEY};
pub use view::{page_items, tag_buttons, tag_label, ListView, PageItem, ScrollMask, TagButton};
