//! Line protocol for the terminal views.
//!
//! Lines starting with `#` are commands. In the player view any other line
//! is taken as search text; in the admin view it is an error.

use lorebook_domain::Visibility;

/// Editable field of the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Summary,
    Body,
    Kind,
    Tags,
    Unlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Help,
    Quit,
    /// Request a login link, optionally setting the e-mail first
    Login(Option<String>),
    /// Finish login from the URL the e-mailed link opened
    Complete(String),
    Logout,
    Refresh,
    /// Show the list and form again
    Show,
    Set(FormField, String),
    Visibility(Visibility),
    Create,
    /// Toggle visibility of the entry at a 1-based list position
    Toggle(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Help,
    Quit,
    List,
    Search(String),
    Kind(String),
    Kinds,
    Tag(String),
    Untag,
    Clear,
}

pub const ADMIN_HELP: &str = "\
Commands:
  #login [email]        - Send a login link (sets the e-mail if given)
  #complete <url>       - Finish login with the URL the link opened
  #logout               - Sign out
  #refresh              - Reload the list
  #show                 - Show the list and form
  #title <text>         - Set the title (required)
  #summary <text>       - Set the summary
  #body <text>          - Set the body
  #kind <text>          - Set the kind
  #tags <a, b, ..>      - Set the tags
  #unlock <n>           - Unlock at session n
  #visibility <public|private>
  #create               - Create an entry from the form
  #toggle <n>           - Flip visibility of entry n
  #help                 - Show this help
  #quit                 - Exit";

pub const PLAYER_HELP: &str = "\
Commands:
  <text>                - Search title, summary, or tags
  #search [text]        - Same; no text clears the search
  #kind <kind>          - Filter by kind (\"all\" for every kind)
  #kinds                - List available kinds
  #tag <tag>            - Filter by tag
  #untag                - Remove the tag filter
  #clear                - Reset all filters
  #list                 - Show the current results
  #help                 - Show this help
  #quit                 - Exit";

/// Split `#name rest` into the lower-cased name and the trimmed rest.
fn split_command(line: &str) -> Option<(String, &str)> {
    let body = line.trim().strip_prefix('#')?;
    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };
    Some((name.to_ascii_lowercase(), rest))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(rest)
    }
}

pub fn parse_admin(line: &str) -> Result<AdminCommand, String> {
    let Some((name, rest)) = split_command(line) else {
        return Err("Commands start with '#'. Type #help for help.".to_string());
    };

    let set = |field| AdminCommand::Set(field, rest.to_string());
    let command = match name.as_str() {
        "help" => AdminCommand::Help,
        "quit" | "exit" => AdminCommand::Quit,
        "login" => AdminCommand::Login((!rest.is_empty()).then(|| rest.to_string())),
        "complete" => AdminCommand::Complete(required(rest, "#complete <url>")?.to_string()),
        "logout" => AdminCommand::Logout,
        "refresh" => AdminCommand::Refresh,
        "show" | "list" => AdminCommand::Show,
        "title" => set(FormField::Title),
        "summary" => set(FormField::Summary),
        "body" => set(FormField::Body),
        "kind" => set(FormField::Kind),
        "tags" => set(FormField::Tags),
        "unlock" => set(FormField::Unlock),
        "visibility" => AdminCommand::Visibility(
            required(rest, "#visibility <public|private>")?
                .parse()
                .map_err(|e: lorebook_domain::DomainError| e.to_string())?,
        ),
        "create" => AdminCommand::Create,
        "toggle" => {
            let position = required(rest, "#toggle <n>")?
                .parse::<usize>()
                .map_err(|_| "Usage: #toggle <n>".to_string())?;
            AdminCommand::Toggle(position)
        }
        _ => return Err("Unknown command. Type #help for help.".to_string()),
    };
    Ok(command)
}

pub fn parse_player(line: &str) -> Result<PlayerCommand, String> {
    let Some((name, rest)) = split_command(line) else {
        return Ok(PlayerCommand::Search(line.trim().to_string()));
    };

    let command = match name.as_str() {
        "help" => PlayerCommand::Help,
        "quit" | "exit" => PlayerCommand::Quit,
        "list" => PlayerCommand::List,
        "search" => PlayerCommand::Search(rest.to_string()),
        "kind" => PlayerCommand::Kind(required(rest, "#kind <kind>")?.to_string()),
        "kinds" => PlayerCommand::Kinds,
        "tag" => PlayerCommand::Tag(required(rest, "#tag <tag>")?.to_string()),
        "untag" => PlayerCommand::Untag,
        "clear" => PlayerCommand::Clear,
        _ => return Err("Unknown command. Type #help for help.".to_string()),
    };
    Ok(command)
}
