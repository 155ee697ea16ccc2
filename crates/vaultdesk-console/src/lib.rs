//! Navigation and data-synchronisation model for the Vaultdesk console.
//!
//! Every navigable path is bound to a [`RouteDef`] that declares at most one
//! [`Loader`] (run before the screen mounts) and at most one [`Action`] (run
//! when the screen's form is submitted). The [`Navigator`] drives both and
//! owns the currently mounted [`Screen`].
//!
//! ## Screens
//!
//! - `/`: [`ListView`], the secret list with local name filtering
//! - `/secrets/new`: [`CreateView`], the creation form
//! - `/secrets/<name>`: [`DetailView`], view/edit of one secret
//!
//! The crate has no rendering of its own; the web surface and the CLI read
//! screen state and feed user input back in.

pub mod clipboard;
pub mod create;
pub mod detail;
mod error;
pub mod list;
pub mod navigator;
pub mod route;
pub mod router;
pub mod routes;
mod screen;

pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use create::{CreateView, NewSecretForm};
pub use detail::{DetailView, Mode, ViewState};
pub use error::ConsoleError;
pub use list::{EmptyState, ListView};
pub use navigator::{
    Commit, CompletedSubmission, Navigator, PendingNavigation, PendingSubmission,
    ResolvedNavigation, SubmitResult,
};
pub use route::{Action, ActionOutcome, FormData, Loader, LoaderData, RouteDef, RouteParams};
pub use router::{RouteMatch, RoutePattern, RouteTable};
pub use routes::{console_routes, secret_path};
pub use screen::{Screen, ScreenKind};
