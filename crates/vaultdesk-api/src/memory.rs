//! In-process secret store.
//!
//! Honours the same contract as the REST backend: duplicate creates fail,
//! updates of missing secrets fail, and listings carry no values.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{ApiError, NewSecret, Secret, SecretsApi, validate_name};

/// Secret store kept in memory, ordered by name.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<BTreeMap<String, Secret>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given secrets.
    pub fn with_secrets(secrets: impl IntoIterator<Item = NewSecret>) -> Self {
        let secrets = secrets
            .into_iter()
            .map(|s| (s.name.clone(), Secret::from(s)))
            .collect();
        Self {
            secrets: RwLock::new(secrets),
        }
    }

    pub async fn len(&self) -> usize {
        self.secrets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.secrets.read().await.is_empty()
    }
}

#[async_trait]
impl SecretsApi for MemorySecretStore {
    async fn list_secrets(&self) -> Result<Vec<Secret>, ApiError> {
        let secrets = self.secrets.read().await;
        Ok(secrets
            .values()
            .map(|s| Secret {
                name: s.name.clone(),
                value: None,
                description: s.description.clone(),
            })
            .collect())
    }

    async fn get_secret(&self, name: &str) -> Result<Secret, ApiError> {
        validate_name(name)?;
        self.secrets
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                name: name.to_string(),
            })
    }

    async fn create_secret(&self, secret: &NewSecret) -> Result<(), ApiError> {
        validate_name(&secret.name)?;

        let mut secrets = self.secrets.write().await;
        if secrets.contains_key(&secret.name) {
            return Err(ApiError::Conflict {
                name: secret.name.clone(),
            });
        }

        let description = secret.description.clone().filter(|d| !d.is_empty());
        secrets.insert(
            secret.name.clone(),
            Secret {
                name: secret.name.clone(),
                value: Some(secret.value.clone()),
                description,
            },
        );
        debug!(name = %secret.name, "stored secret in memory");
        Ok(())
    }

    async fn update_secret(&self, name: &str, value: &str) -> Result<(), ApiError> {
        validate_name(name)?;
        let mut secrets = self.secrets.write().await;
        let secret = secrets.get_mut(name).ok_or_else(|| ApiError::NotFound {
            name: name.to_string(),
        })?;
        secret.value = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = MemorySecretStore::new();
        store.create_secret(&NewSecret::new("x", "y")).await.unwrap();

        let secret = store.get_secret("x").await.unwrap();
        assert_eq!(secret, Secret::new("x", "y"));
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let store = MemorySecretStore::new();
        store.create_secret(&NewSecret::new("x", "y")).await.unwrap();

        let err = store.create_secret(&NewSecret::new("x", "z")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
        assert_eq!(store.get_secret("x").await.unwrap().value.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_list_omits_values_and_sorts() {
        let store = MemorySecretStore::with_secrets([
            NewSecret::new("zeta", "1"),
            NewSecret::new("alpha", "2").with_description("first"),
        ]);

        let secrets = store.list_secrets().await.unwrap();
        let names: Vec<_> = secrets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(secrets.iter().all(|s| s.value.is_none()));
        assert_eq!(secrets[0].description.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_update_missing_secret_fails() {
        let store = MemorySecretStore::new();
        let err = store.update_secret("nope", "v").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_replaces_value_only() {
        let store =
            MemorySecretStore::with_secrets([NewSecret::new("db", "v1").with_description("desc")]);
        store.update_secret("db", "v2").await.unwrap();

        let secret = store.get_secret("db").await.unwrap();
        assert_eq!(secret.value.as_deref(), Some("v2"));
        assert_eq!(secret.description.as_deref(), Some("desc"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_dot_segment_names_are_rejected() {
        let store = MemorySecretStore::with_secrets([NewSecret::new("b", "v1")]);

        let err = store.update_secret("a/../b", "v2").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidName));
        assert_eq!(store.get_secret("b").await.unwrap().value.as_deref(), Some("v1"));

        let err = store.create_secret(&NewSecret::new("./b", "v")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidName));
    }
}
