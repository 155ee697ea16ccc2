//! The loader/action protocol.
//!
//! A route declares how its screen gets data ([`Loader`]) and what happens
//! when its form is submitted ([`Action`]). Neither knows anything about the
//! rendering layer; the [`Navigator`](crate::Navigator) invokes them and
//! enforces ordering.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vaultdesk_api::{ApiError, Secret, SecretsApi};

use crate::router::RoutePattern;
use crate::screen::ScreenKind;

/// Parameters captured from the matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    wildcard: Option<String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wildcard(wildcard: impl Into<String>) -> Self {
        Self {
            wildcard: Some(wildcard.into()),
        }
    }

    /// The decoded remainder captured by a rest-of-path pattern.
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }
}

/// Submitted form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Field value, reading an empty field as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// What a loader hands to its screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderData {
    /// The route has nothing to load.
    Empty,
    Secrets(Vec<Secret>),
    Secret(Secret),
}

/// Result of an action: navigate away, or stay and show an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Redirect(String),
    Error(String),
}

impl ActionOutcome {
    pub fn redirect(to: impl Into<String>) -> Self {
        ActionOutcome::Redirect(to.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        ActionOutcome::Error(message.into())
    }
}

/// Data-loading step, run before a screen renders.
///
/// Failures propagate: a screen whose loader fails is never mounted.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn resolve(
        &self,
        api: &dyn SecretsApi,
        params: &RouteParams,
    ) -> Result<LoaderData, ApiError>;
}

/// Data-mutation step, run once per form submission.
///
/// Failures are converted into [`ActionOutcome::Error`] here, never returned.
#[async_trait]
pub trait Action: Send + Sync {
    async fn submit(
        &self,
        api: &dyn SecretsApi,
        params: &RouteParams,
        form: &FormData,
    ) -> ActionOutcome;
}

/// A navigable path with its screen, optional loader and optional action.
#[derive(Clone)]
pub struct RouteDef {
    pub pattern: RoutePattern,
    pub screen: ScreenKind,
    pub loader: Option<Arc<dyn Loader>>,
    pub action: Option<Arc<dyn Action>>,
}

impl RouteDef {
    pub fn new(pattern: RoutePattern, screen: ScreenKind) -> Self {
        Self {
            pattern,
            screen,
            loader: None,
            action: None,
        }
    }

    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }
}

impl fmt::Debug for RouteDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDef")
            .field("pattern", &self.pattern)
            .field("screen", &self.screen)
            .field("loader", &self.loader.is_some())
            .field("action", &self.action.is_some())
            .finish()
    }
}
