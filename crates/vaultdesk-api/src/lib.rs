//! REST client for the Vaultdesk secret-storage backend.
//!
//! This crate provides the typed client the console uses to talk to the
//! backend, plus an in-process store that honours the same contract.
//!
//! ## Features
//!
//! - **HTTP Client**: list/get/create/update against the `/secrets` REST API
//! - **Memory Store**: in-process backend for demos and tests
//!
//! Every call is a single request. Nothing is cached and nothing is retried;
//! failures go straight back to the caller.

mod client;
mod error;
mod memory;
mod types;

use async_trait::async_trait;

pub use client::{DEFAULT_API_URL, SecretsClient, encode_name};
pub use error::ApiError;
pub use memory::MemorySecretStore;
pub use types::{NewSecret, Secret, validate_name};

/// Operations the console needs from a secret backend.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    /// List all secrets. Values are omitted by the backend.
    async fn list_secrets(&self) -> Result<Vec<Secret>, ApiError>;

    /// Fetch one secret including its value.
    async fn get_secret(&self, name: &str) -> Result<Secret, ApiError>;

    /// Create a secret. Fails if the name is already taken.
    async fn create_secret(&self, secret: &NewSecret) -> Result<(), ApiError>;

    /// Replace the value of an existing secret.
    async fn update_secret(&self, name: &str, value: &str) -> Result<(), ApiError>;
}
