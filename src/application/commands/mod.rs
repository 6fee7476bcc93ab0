pub mod content;
pub mod locales;
pub mod redirects;
pub mod tenants;
