pub mod config;
pub mod error;
pub mod plugin;
pub mod telemetry;

pub use config::EaselConfig;
pub use error::EaselError;
pub use plugin::{MarkupLanguage, Plugin, PollingVerb, RefreshStrategy};
