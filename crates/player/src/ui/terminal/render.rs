//! Plain-text rendering of view state

use std::fmt::Write;

use lorebook_domain::{KindFilter, LoreEntry, Visibility};

use crate::ui::presentation::state::{AdminState, AuthStatus, LoadState, LoreForm, PlayerState};

pub const NO_MATCHES: &str = "No entries match your filters.";

/// One player entry: title, `[kind] ` + summary, then `#tag` chips.
pub fn entry(entry: &LoreEntry) -> String {
    let mut out = format!("* {}\n", entry.title);

    let kind = entry
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .map(|k| format!("[{}] ", k))
        .unwrap_or_default();
    let summary = entry.summary.as_deref().unwrap_or("");
    if !kind.is_empty() || !summary.is_empty() {
        let _ = writeln!(out, "  {}{}", kind, summary);
    }

    if !entry.tags().is_empty() {
        let chips: Vec<String> = entry.tags().iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "  {}", chips.join(" "));
    }
    out
}

/// Active filters, or nothing when none are set.
pub fn filters(state: &PlayerState) -> String {
    let filter = state.filter();
    if filter.is_empty() {
        return String::new();
    }

    let mut parts = Vec::new();
    if !filter.search.trim().is_empty() {
        parts.push(format!("search: \"{}\"", filter.search.trim()));
    }
    if let KindFilter::Only(kind) = &filter.kind {
        parts.push(format!("kind: {}", kind));
    }
    if let Some(tag) = &filter.tag {
        parts.push(format!("tag: {}", tag));
    }
    format!("Filters: {}\n", parts.join(" | "))
}

/// Current results of the player view.
pub fn results(state: &PlayerState) -> String {
    let mut out = filters(state);
    let visible = state.visible();
    if visible.is_empty() {
        let _ = writeln!(out, "{}", NO_MATCHES);
        return out;
    }
    for e in visible {
        out.push_str(&entry(e));
    }
    out
}

pub fn player(state: &PlayerState) -> String {
    match state.load_state() {
        LoadState::Loading => "Loading…\n".to_string(),
        LoadState::Failed(message) => format!("Error: {}\n", message),
        LoadState::Ready => format!(
            "Player Lore\nPublic, unlocked entries only.\n\n{}",
            results(state)
        ),
    }
}

pub fn kinds(state: &PlayerState) -> String {
    format!("Kinds: {}\n", state.kinds().join(", "))
}

fn toggle_label(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "Make Private",
        Visibility::Private => "Make Public",
    }
}

pub fn form(form: &LoreForm) -> String {
    let mut out = String::from("New entry:\n");
    let fields = [
        ("title", form.title.as_str()),
        ("summary", form.summary.as_str()),
        ("body", form.body.as_str()),
        ("visibility", form.visibility.as_str()),
        ("kind", form.kind.as_str()),
        ("tags", form.tags.as_str()),
        ("unlock", form.unlock_session.as_str()),
    ];
    for (name, value) in fields {
        let _ = writeln!(out, "  {:<11}{}", name, value);
    }
    out
}

/// Status line, if any.
pub fn message(state: &AdminState) -> String {
    match &state.message {
        Some(message) if message.is_error() => format!("! {}\n", message),
        Some(message) => format!("{}\n", message),
        None => String::new(),
    }
}

pub fn admin_list(state: &AdminState) -> String {
    let mut out = String::new();
    if state.entries.is_empty() {
        out.push_str("(no entries)\n");
    }
    for (i, e) in state.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<40} {:<8} [#toggle {} : {}]",
            i + 1,
            e.title,
            e.visibility.as_str(),
            i + 1,
            toggle_label(e.visibility)
        );
    }
    out
}

pub fn admin(state: &AdminState) -> String {
    match &state.auth {
        AuthStatus::Unauthenticated => {
            format!("DM Login\nUse #login <email> to get a login link.\n{}", message(state))
        }
        AuthStatus::Authenticated { email } => {
            let mut out = format!(
                "DM - Lore Admin ({})\n",
                email.as_deref().unwrap_or("signed in")
            );
            out.push_str(&message(state));
            out.push_str(&admin_list(state));
            out
        }
    }
}
