pub mod filters;
pub mod layout;
pub mod renderer;
pub mod views;

pub use renderer::{PLACEHOLDER, Renderer, SizeVariant};
pub use views::{StaticViewRegistry, ViewResolver};
