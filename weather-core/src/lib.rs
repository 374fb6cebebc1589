//! Core library for the weather record service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the upstream weather provider
//! - The record store and the service composing it with the provider
//! - Shared domain models (submissions, records)
//!
//! It is used by `weather-server`, but the service can be embedded by any other binary.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod store;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{ProviderError, ServiceError};
pub use model::{CreatedRecord, WeatherPayload, WeatherRecord, WeatherSubmission};
pub use provider::{WeatherProvider, WeatherstackProvider, provider_from_config};
pub use service::WeatherService;
pub use store::{MemoryStore, RecordStore};
