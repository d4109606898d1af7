pub mod providers;

pub use providers::{ContentGenerator, ProviderError};
