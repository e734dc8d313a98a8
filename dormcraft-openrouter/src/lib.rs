//! OpenRouter API client for DormCraft.
//!
//! Provides [`OpenRouterSource`], which plugs a hosted chat model into the
//! suggestion pipeline as a [`dormcraft_core::SuggestionSource`].
//!
//! # Example
//!
//! ```ignore
//! use dormcraft_core::{SuggestionContext, SuggestionPipeline};
//! use dormcraft_openrouter::{OpenRouterClient, OpenRouterSource, DEFAULT_MODEL};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OpenRouterClient::new("your-api-key");
//!     let source = OpenRouterSource::new(client, DEFAULT_MODEL);
//!
//!     let mut board = load_board();
//!     let accepted = SuggestionPipeline::new()
//!         .run(&mut board, &source)
//!         .await
//!         .unwrap();
//!     println!("{}: {}", accepted.layout_id, accepted.rationale);
//! }
//! ```

mod client;
mod convert;
mod error;
mod source;
mod types;

pub use client::OpenRouterClient;
pub use convert::{build_request_body, parse_response};
pub use error::OpenRouterError;
pub use source::{OpenRouterSource, DEFAULT_MODEL};
pub use types::{Completion, GenerationParams, OpenRouterRequest, TokenUsage};
