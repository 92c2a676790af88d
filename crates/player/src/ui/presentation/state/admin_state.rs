//! Admin view state: auth status, lore list, create form, status line

use std::fmt;

use lorebook_domain::{DomainError, LoreSummary, LoreTitle, NewLoreEntry, Visibility};

/// Whether the admin is signed in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unauthenticated,
    Authenticated { email: Option<String> },
}

/// Status line shown above the admin list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminMessage(String);

impl AdminMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// `"Error: <message>"`
    pub fn error(message: impl fmt::Display) -> Self {
        Self(format!("Error: {}", message))
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Errors start with `Error`; everything else is an acknowledgement.
    pub fn is_error(&self) -> bool {
        self.0.starts_with("Error")
    }
}

impl fmt::Display for AdminMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Create-entry form as typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoreForm {
    pub title: String,
    pub summary: String,
    pub body: String,
    pub visibility: Visibility,
    /// Optional; blank leaves the backend default
    pub kind: String,
    /// Comma-separated
    pub tags: String,
    /// Optional whole number
    pub unlock_session: String,
}

impl LoreForm {
    /// Validate into an insert payload. Fails on a blank title before any
    /// request is made.
    pub fn to_new_entry(&self) -> Result<NewLoreEntry, DomainError> {
        let title = LoreTitle::new(self.title.as_str())?;
        let mut entry = NewLoreEntry::new(title, self.visibility)
            .with_summary(self.summary.as_str())
            .with_body(self.body.as_str());

        let kind = self.kind.trim();
        if !kind.is_empty() {
            entry = entry.with_kind(kind);
        }

        let tags = parse_tags(&self.tags);
        if !tags.is_empty() {
            entry = entry.with_tags(tags);
        }

        let unlock = self.unlock_session.trim();
        if !unlock.is_empty() {
            let session = unlock.parse::<i64>().map_err(|_| {
                DomainError::validation("Unlock session must be a whole number.")
            })?;
            entry = entry.with_unlock_session(session);
        }

        Ok(entry)
    }

    /// Back to defaults: empty fields, `public`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Admin view state
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub auth: AuthStatus,
    /// Login e-mail as typed
    pub email: String,
    pub entries: Vec<LoreSummary>,
    pub form: LoreForm,
    pub message: Option<AdminMessage>,
    /// Raised while a create is in flight
    pub saving: bool,
}

impl AdminState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthStatus::Authenticated { .. })
    }

    pub fn set_message(&mut self, message: AdminMessage) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Entry by 1-based position in the current list
    pub fn entry_at(&self, position: usize) -> Option<&LoreSummary> {
        position.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Forget everything tied to the signed-in admin.
    pub fn sign_out(&mut self) {
        self.auth = AuthStatus::Unauthenticated;
        self.entries.clear();
        self.form.reset();
        self.saving = false;
    }
}
