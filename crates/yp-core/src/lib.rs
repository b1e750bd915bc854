pub mod config;
pub mod error;
pub mod intent;
pub mod io;
pub mod mode;
pub mod paths;
pub mod pattern;
pub mod persona;
pub mod seo;
pub mod types;
pub mod voice;

pub use error::{Result, YpError};
pub use types::{ContentType, Intent, Mode, TomUser};
