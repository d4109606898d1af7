//! Request and content-part types for the recipe proxy.

pub mod part;
pub mod request;

pub use part::{InlineData, Part};
pub use request::{GenerateRecipeRequest, ImagePayload, NO_CONTENT_MESSAGE};
