//! New-secret screen.

use vaultdesk_api::NewSecret;

use crate::route::FormData;

/// Locally buffered fields of the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSecretForm {
    pub name: String,
    pub value: String,
    pub description: String,
}

impl NewSecretForm {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: form.get("name").unwrap_or_default().to_string(),
            value: form.get("value").unwrap_or_default().to_string(),
            description: form.get("description").unwrap_or_default().to_string(),
        }
    }

    pub fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", self.name.clone())
            .with("value", self.value.clone())
            .with("description", self.description.clone())
    }

    /// The create payload, or `None` if name or value is empty.
    /// An empty description is sent as absent.
    pub fn to_new_secret(&self) -> Option<NewSecret> {
        if self.name.is_empty() || self.value.is_empty() {
            return None;
        }
        let mut secret = NewSecret::new(self.name.clone(), self.value.clone());
        if !self.description.is_empty() {
            secret = secret.with_description(self.description.clone());
        }
        Some(secret)
    }
}

/// The creation form and the last action error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateView {
    form: NewSecretForm,
    error: Option<String>,
}

impl CreateView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &NewSecretForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NewSecretForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submission(&self) -> FormData {
        self.form.to_form()
    }

    /// Record a failed create, keeping what the user entered.
    pub(crate) fn fail_submit(&mut self, message: String, form: &FormData) {
        self.form = NewSecretForm::from_form(form);
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_is_dropped() {
        let form = NewSecretForm {
            name: "api-key".into(),
            value: "s3cr3t".into(),
            description: String::new(),
        };
        assert_eq!(form.to_new_secret(), Some(NewSecret::new("api-key", "s3cr3t")));
    }

    #[test]
    fn test_name_and_value_required() {
        let mut form = NewSecretForm {
            name: "api-key".into(),
            ..Default::default()
        };
        assert_eq!(form.to_new_secret(), None);

        form.name.clear();
        form.value = "v".into();
        assert_eq!(form.to_new_secret(), None);
    }

    #[test]
    fn test_failed_submit_preserves_form() {
        let mut view = CreateView::new();
        view.form_mut().name = "dup".into();
        view.form_mut().value = "v".into();
        let submitted = view.submission();

        view.fail_submit("Failed to create secret".into(), &submitted);
        assert_eq!(view.form().name, "dup");
        assert_eq!(view.form().value, "v");
        assert_eq!(view.error(), Some("Failed to create secret"));
    }
}
