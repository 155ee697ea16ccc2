//! Navigation controller.
//!
//! The navigator owns the mounted screen and runs loaders and actions on its
//! behalf. It guarantees that:
//!
//! - a screen is mounted only after its loader resolved successfully;
//! - a failed loader leaves the previous screen and location untouched;
//! - an action resolves to either a redirect (the screen is dropped and the
//!   target is navigated to) or an inline error (the screen stays, with the
//!   submitted form preserved);
//! - at most one submission is pending per screen;
//! - a result that arrives after a newer navigation started, or after the
//!   screen it was submitted from was replaced, is discarded.
//!
//! Each step is split into a `begin_*` phase that borrows the navigator, a
//! phase that awaits the backend without borrowing it, and a commit phase.
//! An event loop can keep handling input while a request is in flight; the
//! generation counter makes any late result harmless.

use std::sync::Arc;

use tracing::{debug, info};
use vaultdesk_api::{ApiError, SecretsApi};

use crate::ConsoleError;
use crate::route::{Action, ActionOutcome, FormData, LoaderData};
use crate::router::{RouteMatch, RouteTable};
use crate::screen::Screen;

/// A navigation whose loader has not run yet.
#[derive(Debug)]
pub struct PendingNavigation {
    generation: u64,
    location: String,
    matched: RouteMatch,
}

impl PendingNavigation {
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Run the route's loader. Routes without one resolve to [`LoaderData::Empty`].
    pub async fn resolve(self, api: &dyn SecretsApi) -> ResolvedNavigation {
        let data = match &self.matched.route.loader {
            Some(loader) => loader.resolve(api, &self.matched.params).await,
            None => Ok(LoaderData::Empty),
        };
        ResolvedNavigation {
            generation: self.generation,
            location: self.location,
            matched: self.matched,
            data,
        }
    }
}

/// A navigation whose loader has finished, successfully or not.
#[derive(Debug)]
pub struct ResolvedNavigation {
    generation: u64,
    location: String,
    matched: RouteMatch,
    data: Result<LoaderData, ApiError>,
}

/// What happened when a resolved navigation was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Mounted,
    /// A newer navigation started meanwhile; the result was dropped.
    Abandoned,
}

/// A submission whose action has not run yet.
pub struct PendingSubmission {
    generation: u64,
    mount: u64,
    action: Arc<dyn Action>,
    matched: RouteMatch,
    form: FormData,
}

impl PendingSubmission {
    pub async fn run(self, api: &dyn SecretsApi) -> CompletedSubmission {
        let outcome = self.action.submit(api, &self.matched.params, &self.form).await;
        CompletedSubmission {
            generation: self.generation,
            mount: self.mount,
            form: self.form,
            outcome,
        }
    }
}

/// A submission whose action has produced an outcome.
#[derive(Debug)]
pub struct CompletedSubmission {
    generation: u64,
    mount: u64,
    form: FormData,
    outcome: ActionOutcome,
}

impl CompletedSubmission {
    pub fn outcome(&self) -> &ActionOutcome {
        &self.outcome
    }
}

/// What a submission did to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// The action redirected and the target screen is now mounted.
    Redirected(String),
    /// The action failed; the error is shown on the current screen.
    Failed(String),
    /// The screen was left before the action finished; the result was dropped.
    Abandoned,
}

#[derive(Debug)]
struct Mounted {
    /// Generation of the navigation that mounted this screen.
    id: u64,
    location: String,
    matched: RouteMatch,
    screen: Screen,
}

/// Drives loaders and actions and holds the mounted screen.
pub struct Navigator {
    api: Arc<dyn SecretsApi>,
    routes: Arc<RouteTable>,
    generation: u64,
    current: Option<Mounted>,
    submitting: bool,
}

impl Navigator {
    pub fn new(api: Arc<dyn SecretsApi>, routes: Arc<RouteTable>) -> Self {
        Self {
            api,
            routes,
            generation: 0,
            current: None,
            submitting: false,
        }
    }

    pub fn api(&self) -> Arc<dyn SecretsApi> {
        Arc::clone(&self.api)
    }

    /// Location of the mounted screen.
    pub fn location(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.location.as_str())
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.current.as_ref().map(|m| &m.screen)
    }

    pub fn screen_mut(&mut self) -> Option<&mut Screen> {
        self.current.as_mut().map(|m| &mut m.screen)
    }

    /// Whether a submission is in flight. The UI disables its submit control
    /// while this is true.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Start navigating to `location`. Supersedes any pending navigation or
    /// submission.
    pub fn begin_navigation(&mut self, location: &str) -> Result<PendingNavigation, ConsoleError> {
        let matched = self.routes.resolve(location)?;
        self.generation += 1;
        self.submitting = false;
        debug!(location = %location, generation = self.generation, "navigation started");
        Ok(PendingNavigation {
            generation: self.generation,
            location: location.to_string(),
            matched,
        })
    }

    /// Mount the screen for a resolved navigation.
    ///
    /// A loader failure is returned as [`ConsoleError::Loader`] and nothing is
    /// mounted. A stale resolution is dropped without touching any state.
    pub fn commit(&mut self, resolved: ResolvedNavigation) -> Result<Commit, ConsoleError> {
        if resolved.generation != self.generation {
            debug!(location = %resolved.location, "dropping stale navigation");
            return Ok(Commit::Abandoned);
        }

        let data = resolved.data.map_err(|source| ConsoleError::Loader {
            path: resolved.matched.path.clone(),
            source,
        })?;
        let screen = Screen::mount(resolved.matched.route.screen, data, &resolved.matched.path)?;

        self.submitting = false;
        self.current = Some(Mounted {
            id: resolved.generation,
            location: resolved.location,
            matched: resolved.matched,
            screen,
        });
        Ok(Commit::Mounted)
    }

    /// Navigate to `location`: run its loader, then mount its screen.
    pub async fn navigate(&mut self, location: &str) -> Result<&mut Screen, ConsoleError> {
        let pending = self.begin_navigation(location)?;
        let api = self.api();
        let resolved = pending.resolve(api.as_ref()).await;
        self.commit(resolved)?;
        self.screen_mut().ok_or(ConsoleError::NoScreen)
    }

    /// Start submitting `form` to the mounted screen's action.
    pub fn begin_submit(&mut self, form: FormData) -> Result<PendingSubmission, ConsoleError> {
        if self.submitting {
            return Err(ConsoleError::SubmissionPending);
        }
        let mounted = self.current.as_ref().ok_or(ConsoleError::NoScreen)?;
        let action = mounted
            .matched
            .route
            .action
            .clone()
            .ok_or_else(|| ConsoleError::NoAction {
                path: mounted.matched.path.clone(),
            })?;

        self.submitting = true;
        Ok(PendingSubmission {
            generation: self.generation,
            mount: mounted.id,
            action,
            matched: mounted.matched.clone(),
            form,
        })
    }

    /// Apply a finished submission.
    ///
    /// On redirect the current screen and its edit state are dropped before
    /// the target's loader runs. On error the current screen stays mounted
    /// and shows the message with the submitted form restored.
    pub async fn finish_submit(
        &mut self,
        done: CompletedSubmission,
    ) -> Result<SubmitResult, ConsoleError> {
        let mount = self.current.as_ref().map(|m| m.id);
        if done.generation != self.generation || mount != Some(done.mount) {
            debug!("dropping result of abandoned submission");
            return Ok(SubmitResult::Abandoned);
        }
        self.submitting = false;

        match done.outcome {
            ActionOutcome::Redirect(target) => {
                info!(target = %target, "action redirected");
                self.current = None;
                self.navigate(&target).await?;
                Ok(SubmitResult::Redirected(target))
            }
            ActionOutcome::Error(message) => {
                if let Some(mounted) = self.current.as_mut() {
                    mounted.screen.apply_action_error(message.clone(), &done.form);
                }
                Ok(SubmitResult::Failed(message))
            }
        }
    }

    /// Submit `form` to the mounted screen's action and apply the outcome.
    pub async fn submit(&mut self, form: FormData) -> Result<SubmitResult, ConsoleError> {
        let pending = self.begin_submit(form)?;
        let api = self.api();
        let done = pending.run(api.as_ref()).await;
        self.finish_submit(done).await
    }
}
