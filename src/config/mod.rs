//! Configuration module

mod site;

pub use site::BuildConfig;
pub use site::FooterConfig;
pub use site::PathsConfig;
pub use site::SiteConfig;
