//! Mounted screens.

use vaultdesk_api::Secret;

use crate::ConsoleError;
use crate::create::CreateView;
use crate::detail::DetailView;
use crate::list::ListView;
use crate::route::{FormData, LoaderData, RouteParams};

/// Which screen a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    List,
    Create,
    Detail,
}

/// A screen together with its state. Dropped on navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List(ListView),
    Create(CreateView),
    Detail(DetailView),
}

impl Screen {
    /// Build a screen from its loader's data.
    pub(crate) fn mount(kind: ScreenKind, data: LoaderData, path: &str) -> Result<Self, ConsoleError> {
        match (kind, data) {
            (ScreenKind::List, LoaderData::Secrets(secrets)) => Ok(Screen::List(ListView::new(secrets))),
            (ScreenKind::Create, LoaderData::Empty) => Ok(Screen::Create(CreateView::new())),
            (ScreenKind::Detail, LoaderData::Secret(secret)) => {
                Ok(Screen::Detail(DetailView::new(secret)))
            }
            _ => Err(ConsoleError::UnexpectedData {
                path: path.to_string(),
            }),
        }
    }

    /// A screen for `kind` built without loader data, so an action error can
    /// still be shown when the loader is unavailable. A detail screen knows
    /// only the secret's name.
    pub fn unloaded(kind: ScreenKind, params: &RouteParams) -> Self {
        match kind {
            ScreenKind::List => Screen::List(ListView::new(Vec::new())),
            ScreenKind::Create => Screen::Create(CreateView::new()),
            ScreenKind::Detail => Screen::Detail(DetailView::new(Secret {
                name: params.wildcard().unwrap_or_default().to_string(),
                value: None,
                description: None,
            })),
        }
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::List(_) => ScreenKind::List,
            Screen::Create(_) => ScreenKind::Create,
            Screen::Detail(_) => ScreenKind::Detail,
        }
    }

    pub fn as_list(&self) -> Option<&ListView> {
        match self {
            Screen::List(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListView> {
        match self {
            Screen::List(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_create(&self) -> Option<&CreateView> {
        match self {
            Screen::Create(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_create_mut(&mut self) -> Option<&mut CreateView> {
        match self {
            Screen::Create(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_detail(&self) -> Option<&DetailView> {
        match self {
            Screen::Detail(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_detail_mut(&mut self) -> Option<&mut DetailView> {
        match self {
            Screen::Detail(view) => Some(view),
            _ => None,
        }
    }

    /// The last action error shown on this screen.
    pub fn error(&self) -> Option<&str> {
        match self {
            Screen::List(_) => None,
            Screen::Create(view) => view.error(),
            Screen::Detail(view) => view.error(),
        }
    }

    /// Show a failed action's message, restoring the submitted form.
    pub fn apply_action_error(&mut self, message: String, form: &FormData) {
        match self {
            Screen::List(_) => {}
            Screen::Create(view) => view.fail_submit(message, form),
            Screen::Detail(view) => view.fail_submit(message, form),
        }
    }
}
