#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Framework models backed by vendor endpoints
//!
//! Wires the conversions from `conversion-ox` to a [`ChatTransport`] and exposes
//! the result as a [`Model`]. Every failure is reported in-band as an error
//! [`adk_ox::LlmResponse`].
//!
//! ```no_run
//! # use model_ox::{ProviderConfig, ProviderKind, ProviderRegistry};
//! let mut registry = ProviderRegistry::new();
//! registry.register(
//!     "groq",
//!     ProviderConfig::builder()
//!         .kind(ProviderKind::OpenAiCompatible)
//!         .env_prefix("GROQ")
//!         .base_url("https://api.groq.com/openai/v1")
//!         .build(),
//! );
//! let model = registry.create_model("groq", "llama-3.3-70b-versatile")?;
//! # Ok::<(), model_ox::ModelError>(())
//! ```

pub mod anthropic;
pub mod config;
pub mod error;
pub mod model;
pub mod openai;
pub mod registry;
pub mod transport;

pub use anthropic::AnthropicModel;
pub use config::{ProviderConfig, ProviderKind, ResolvedConfig};
pub use error::ModelError;
pub use model::Model;
pub use openai::OpenAiCompatibleModel;
pub use registry::ProviderRegistry;
pub use transport::{ChatTransport, HttpTransport};
