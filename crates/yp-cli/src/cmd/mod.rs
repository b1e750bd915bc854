pub mod config;
pub mod seo;
pub mod tom;
pub mod voice;
