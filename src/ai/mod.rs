pub mod client;
pub mod inference;

pub use client::{ModelClient, OllamaClient, TransportError};
