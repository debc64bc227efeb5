pub mod client;
pub mod models;

pub use client::BotmetaClient;
pub use models::{DEFAULT_TAG, ErrorBody, RenderRequest};
