//! The console's route table and its loaders and actions.
//!
//! | Path              | Screen | Loader          | Action                   |
//! |-------------------|--------|-----------------|--------------------------|
//! | `/`               | List   | list secrets    | none                     |
//! | `/secrets/new`    | Create | none            | create, redirect to `/`  |
//! | `/secrets/<name>` | Detail | get `<name>`    | update, redirect to `/`  |

use async_trait::async_trait;
use tracing::{debug, info, warn};
use vaultdesk_api::{ApiError, SecretsApi};

use crate::create::NewSecretForm;
use crate::route::{Action, ActionOutcome, FormData, Loader, LoaderData, RouteDef, RouteParams};
use crate::router::{RoutePattern, RouteTable};
use crate::screen::ScreenKind;

pub const LIST_PATH: &str = "/";
pub const NEW_SECRET_PATH: &str = "/secrets/new";
pub const SECRET_PREFIX: &str = "/secrets/";

pub const CREATE_FAILED: &str = "Failed to create secret";
pub const UPDATE_FAILED: &str = "Failed to update secret";

/// Console path of a secret's detail screen.
///
/// The whole name is one percent-encoded segment (`/` becomes `%2F`), so
/// trailing slashes and `.`/`..` parts survive browser normalisation.
pub fn secret_path(name: &str) -> String {
    format!("{}{}", SECRET_PREFIX, urlencoding::encode(name))
}

/// Build the console's route table.
pub fn console_routes() -> RouteTable {
    RouteTable::new()
        .route(
            RouteDef::new(RoutePattern::exact(LIST_PATH), ScreenKind::List)
                .with_loader(ListSecretsLoader),
        )
        .route(
            RouteDef::new(RoutePattern::exact(NEW_SECRET_PATH), ScreenKind::Create)
                .with_action(CreateSecretAction),
        )
        .route(
            RouteDef::new(RoutePattern::rest(SECRET_PREFIX), ScreenKind::Detail)
                .with_loader(SecretLoader)
                .with_action(UpdateSecretAction),
        )
}

/// Loads the full secret list for `/`.
pub struct ListSecretsLoader;

#[async_trait]
impl Loader for ListSecretsLoader {
    async fn resolve(
        &self,
        api: &dyn SecretsApi,
        _params: &RouteParams,
    ) -> Result<LoaderData, ApiError> {
        Ok(LoaderData::Secrets(api.list_secrets().await?))
    }
}

/// Loads one secret named by the rest of the path.
pub struct SecretLoader;

#[async_trait]
impl Loader for SecretLoader {
    async fn resolve(
        &self,
        api: &dyn SecretsApi,
        params: &RouteParams,
    ) -> Result<LoaderData, ApiError> {
        let name = params.wildcard().ok_or(ApiError::InvalidName)?;
        Ok(LoaderData::Secret(api.get_secret(name).await?))
    }
}

/// Creates a secret from the `name`, `value` and `description` fields.
pub struct CreateSecretAction;

#[async_trait]
impl Action for CreateSecretAction {
    async fn submit(
        &self,
        api: &dyn SecretsApi,
        _params: &RouteParams,
        form: &FormData,
    ) -> ActionOutcome {
        let Some(secret) = NewSecretForm::from_form(form).to_new_secret() else {
            debug!("create rejected: name and value are required");
            return ActionOutcome::error(CREATE_FAILED);
        };

        match api.create_secret(&secret).await {
            Ok(()) => {
                info!(name = %secret.name, "created secret");
                ActionOutcome::redirect(LIST_PATH)
            }
            Err(e) => {
                warn!(name = %secret.name, error = %e, "failed to create secret");
                ActionOutcome::error(CREATE_FAILED)
            }
        }
    }
}

/// Replaces the value of the secret named by the rest of the path.
pub struct UpdateSecretAction;

#[async_trait]
impl Action for UpdateSecretAction {
    async fn submit(
        &self,
        api: &dyn SecretsApi,
        params: &RouteParams,
        form: &FormData,
    ) -> ActionOutcome {
        let Some(name) = params.wildcard() else {
            return ActionOutcome::error(UPDATE_FAILED);
        };
        let Some(value) = form.get_non_empty("value") else {
            debug!(name = %name, "update rejected: value is required");
            return ActionOutcome::error(UPDATE_FAILED);
        };

        match api.update_secret(name, value).await {
            Ok(()) => {
                info!(name = %name, "updated secret");
                ActionOutcome::redirect(LIST_PATH)
            }
            Err(e) => {
                warn!(name = %name, error = %e, "failed to update secret");
                ActionOutcome::error(UPDATE_FAILED)
            }
        }
    }
}
