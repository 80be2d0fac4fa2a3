//! Small helpers shared by the generator and the client renderer

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
