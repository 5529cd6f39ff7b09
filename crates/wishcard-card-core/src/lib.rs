//! WishCard Card Core - Card generation pipeline
//!
//! Turns a loosely structured card request into a deterministic generation
//! prompt, gates it on the user's entitlement, invokes the image provider,
//! and persists the resulting artifact:
//!
//! validate -> entitle -> synthesize -> generate -> persist -> record usage

pub mod artifact;
pub mod entitlement;
pub mod error;
pub mod fal;
pub mod prompt;
pub mod provider;
pub mod service;
pub mod taxonomy;
pub mod validate;

pub use artifact::{ArtifactStore, LocalArtifactStore};
pub use entitlement::{check_quota, entitle, Entitlement, GenerationBackend};
pub use error::{CardError, ValidationError};
pub use fal::FalClient;
pub use prompt::build_prompt;
pub use provider::ImageGenerator;
pub use service::CardService;
pub use taxonomy::PromptTaxonomy;
pub use validate::validate_request;
