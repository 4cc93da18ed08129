//! Configuration module

mod site;

pub use site::CarouselConfig;
pub use site::ScrollConfig;
pub use site::SiteConfig;
pub use site::ThemeConfig;
