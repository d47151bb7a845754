//! Remote metadata provider - looks tracks up on the iTunes Search API.
//!
//! # Architecture
//!
//! Same layering as any external API we talk to:
//! - **Domain** (`domain.rs`) - [`ResolvedMetadata`] and [`ProviderError`]
//! - **DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapter** (`adapter.rs`) - DTO → domain, including artwork upscaling
//! - **Client** (`client.rs`) - HTTP client with timeout and cancellation
//! - **Traits** (`traits.rs`) - [`MetadataProvider`] seam for mocking
//!
//! Every failure collapses into three outcomes for callers:
//! `Ok(Some(match))`, `Ok(None)` and `Err(ProviderError)`.

pub mod adapter;
mod client;
pub mod domain;
pub mod dto;
pub mod traits;

pub use adapter::upscale_artwork;
pub use client::ItunesClient;
pub use domain::{ProviderError, ResolvedMetadata};
pub use traits::MetadataProvider;
