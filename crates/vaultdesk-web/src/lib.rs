//! Browser surface for the Vaultdesk console.
//!
//! Every console path is resolved through the console's route table, so the
//! pages served here are exactly the screens the navigator mounts:
//! - `/`: secret list with a search box
//! - `/secrets/new`: creation form
//! - `/secrets/<name>`: secret detail with copy and edit

mod error;
mod pages;
mod routes;

pub use error::WebError;
pub use routes::{AppState, create_router};
