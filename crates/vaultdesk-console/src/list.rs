//! Secret list screen.

use vaultdesk_api::Secret;

use crate::routes::secret_path;

/// Which empty message the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing exists yet; offer to create the first secret.
    NoSecrets,
    /// Secrets exist but none match the search term.
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoSecrets => "No secrets found.",
            EmptyState::NoMatches => "No secrets found matching your search.",
        }
    }

    /// Whether to show the "create your first secret" call to action.
    pub fn offers_create(self) -> bool {
        matches!(self, EmptyState::NoSecrets)
    }
}

/// Loaded secrets plus the local search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    secrets: Vec<Secret>,
    search_term: String,
}

impl ListView {
    pub fn new(secrets: Vec<Secret>) -> Self {
        Self {
            secrets,
            search_term: String::new(),
        }
    }

    pub fn secrets(&self) -> &[Secret] {
        &self.secrets
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Update the search term. Filtering is local; nothing is re-fetched.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Secrets whose name contains the search term, ignoring case.
    pub fn filtered(&self) -> Vec<&Secret> {
        let needle = self.search_term.to_lowercase();
        self.secrets
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// `None` when at least one secret is shown.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.filtered().is_empty() {
            return None;
        }
        if self.search_term.is_empty() {
            Some(EmptyState::NoSecrets)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Link target for a listed secret.
    pub fn detail_href(secret: &Secret) -> String {
        secret_path(&secret.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(view: &ListView) -> Vec<&str> {
        view.filtered().iter().map(|s| s.name.as_str()).collect()
    }

    fn view() -> ListView {
        ListView::new(vec![
            Secret {
                name: "prd/Database".into(),
                value: None,
                description: Some("Production database credentials".into()),
            },
            Secret {
                name: "stg/database".into(),
                value: None,
                description: None,
            },
            Secret {
                name: "api-key".into(),
                value: None,
                description: None,
            },
        ])
    }

    #[test]
    fn test_empty_term_shows_everything() {
        let view = view();
        assert_eq!(names(&view), vec!["prd/Database", "stg/database", "api-key"]);
        assert_eq!(view.empty_state(), None);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut view = view();
        view.set_search_term("DATA");
        assert_eq!(names(&view), vec!["prd/Database", "stg/database"]);

        view.set_search_term("prd/");
        assert_eq!(names(&view), vec!["prd/Database"]);
    }

    #[test]
    fn test_filter_does_not_match_description() {
        let mut view = view();
        view.set_search_term("credentials");
        assert!(view.filtered().is_empty());
        assert_eq!(view.empty_state(), Some(EmptyState::NoMatches));
        assert!(!EmptyState::NoMatches.offers_create());
    }

    #[test]
    fn test_nothing_loaded_offers_create() {
        let view = ListView::new(Vec::new());
        assert_eq!(view.empty_state(), Some(EmptyState::NoSecrets));
        assert!(EmptyState::NoSecrets.offers_create());
        assert_eq!(EmptyState::NoSecrets.message(), "No secrets found.");
    }

    #[test]
    fn test_detail_href_encodes_name() {
        let secret = Secret::new("team/db key", "v");
        assert_eq!(ListView::detail_href(&secret), "/secrets/team%2Fdb%20key");
    }
}
