//! Web routes.
//!
//! Apart from `/health`, every request is resolved against the console's route
//! table. `GET` mounts the screen for the path through a fresh [`Navigator`]
//! and renders it. `POST` runs the route's action first; a redirect is
//! returned as a 303, and an error is shown on the re-rendered screen.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Query, Request, State},
    http::{Method, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use vaultdesk_api::SecretsApi;
use vaultdesk_console::{
    ActionOutcome, ConsoleError, FormData, Navigator, RouteTable, Screen, console_routes,
};

use crate::WebError;
use crate::pages;

/// Shared state for the web server.
pub struct AppState {
    pub api: Arc<dyn SecretsApi>,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    fn navigator(&self) -> Navigator {
        Navigator::new(Arc::clone(&self.api), Arc::clone(&self.routes))
    }
}

/// Create the web router over a secret backend.
pub fn create_router(api: Arc<dyn SecretsApi>) -> Router {
    let state = Arc::new(AppState {
        api,
        routes: Arc::new(console_routes()),
    });

    Router::new()
        .route("/health", get(health))
        .fallback(console)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn console(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let method = request.method().clone();
    let result = match method {
        Method::GET => show(&state, request.uri()).await,
        Method::POST => submit(&state, request).await,
        _ => Err(WebError::MethodNotAllowed),
    };

    match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn show(state: &AppState, uri: &Uri) -> Result<Response, WebError> {
    let Query(query) =
        Query::<FormData>::try_from_uri(uri).map_err(|e| WebError::BadRequest(e.body_text()))?;

    let mut navigator = state.navigator();
    let screen = navigator.navigate(uri.path()).await?;

    match screen {
        Screen::List(view) => {
            if let Some(term) = query.get("q") {
                view.set_search_term(term);
            }
        }
        Screen::Detail(view) => {
            if query.get("edit") == Some("1") {
                view.begin_edit();
            }
        }
        Screen::Create(_) => {}
    }

    Ok(Html(pages::render(screen)).into_response())
}

async fn submit(state: &AppState, request: Request) -> Result<Response, WebError> {
    let path = request.uri().path().to_string();
    let Form(form) = Form::<FormData>::from_request(request, &())
        .await
        .map_err(|e| WebError::BadRequest(e.body_text()))?;

    // Actions run without the route's loader.
    let matched = state.routes.resolve(&path)?;
    let action = matched
        .route
        .action
        .clone()
        .ok_or_else(|| ConsoleError::NoAction {
            path: matched.path.clone(),
        })?;

    let message = match action.submit(state.api.as_ref(), &matched.params, &form).await {
        // The browser follows the redirect and loads the target itself.
        ActionOutcome::Redirect(target) => {
            debug!(from = %path, to = %target, "redirecting after submission");
            return Ok(Redirect::to(&target).into_response());
        }
        ActionOutcome::Error(message) => message,
    };

    let mut navigator = state.navigator();
    let mut screen = match navigator.navigate(&path).await {
        Ok(screen) => screen.clone(),
        Err(e) => {
            warn!(path = %path, error = %e, "could not reload screen after failed submission");
            Screen::unloaded(matched.route.screen, &matched.params)
        }
    };
    screen.apply_action_error(message, &form);
    Ok(Html(pages::render(&screen)).into_response())
}
