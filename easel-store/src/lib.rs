pub mod store;

pub use store::PluginStore;
