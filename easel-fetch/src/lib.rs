pub mod fetcher;
pub mod validator;

pub use fetcher::{Fetcher, RefreshOutcome};
pub use validator::validate;
