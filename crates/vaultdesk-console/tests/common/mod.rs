//! Shared test backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use vaultdesk_api::{ApiError, MemorySecretStore, NewSecret, Secret, SecretsApi};

/// Backend that records mutating calls and can be told to fail them.
#[derive(Default)]
pub struct RecordingApi {
    store: MemorySecretStore,
    creates: AtomicUsize,
    updates: AtomicUsize,
    fail_writes: AtomicBool,
}

impl RecordingApi {
    pub fn with_secrets(secrets: impl IntoIterator<Item = NewSecret>) -> Self {
        Self {
            store: MemorySecretStore::with_secrets(secrets),
            ..Default::default()
        }
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_result(&self) -> Result<(), ApiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(ApiError::Status {
                status: 500,
                message: "backend unavailable".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SecretsApi for RecordingApi {
    async fn list_secrets(&self) -> Result<Vec<Secret>, ApiError> {
        self.store.list_secrets().await
    }

    async fn get_secret(&self, name: &str) -> Result<Secret, ApiError> {
        self.store.get_secret(name).await
    }

    async fn create_secret(&self, secret: &NewSecret) -> Result<(), ApiError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;
        self.store.create_secret(secret).await
    }

    async fn update_secret(&self, name: &str, value: &str) -> Result<(), ApiError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;
        self.store.update_secret(name, value).await
    }
}
