//! Admin shell - sign in and manage lore from the terminal
//!
//! Input lines and session-change notifications are multiplexed, so a
//! token refresh or sign-out elsewhere updates the view between commands.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::commands::{parse_admin, AdminCommand, FormField, ADMIN_HELP};
use super::render;
use crate::ui::presentation::views::AdminView;

const SIGN_IN_FIRST: &str = "Sign in first. Use #login <email>.";

/// Run the admin view until input ends or `#quit`.
pub async fn run_admin<R, W>(view: &mut AdminView, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    view.mount().await;
    write!(out, "{}", render::admin(view.state()))?;
    out.flush()?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_admin(&line) {
                    Ok(AdminCommand::Quit) => break,
                    Ok(command) => execute(view, command, out).await?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Some(change) = view.next_auth_change() => {
                view.handle_auth_change(change).await;
                write!(out, "{}", render::admin(view.state()))?;
            }
        }
        out.flush()?;
    }

    view.teardown();
    Ok(())
}

async fn execute<W: Write>(view: &mut AdminView, command: AdminCommand, out: &mut W) -> io::Result<()> {
    let needs_session = matches!(
        command,
        AdminCommand::Refresh
            | AdminCommand::Show
            | AdminCommand::Set(..)
            | AdminCommand::Visibility(_)
            | AdminCommand::Create
            | AdminCommand::Toggle(_)
    );
    if needs_session && !view.state().is_authenticated() {
        writeln!(out, "{}", SIGN_IN_FIRST)?;
        return Ok(());
    }

    match command {
        AdminCommand::Help => {
            writeln!(out, "{}", ADMIN_HELP)?;
            return Ok(());
        }
        AdminCommand::Quit => return Ok(()),
        AdminCommand::Login(email) => {
            if let Some(email) = email {
                view.state_mut().email = email;
            }
            view.request_login_link().await;
        }
        AdminCommand::Complete(url) => view.complete_login(&url).await,
        AdminCommand::Logout => view.sign_out().await,
        AdminCommand::Refresh => view.refresh().await,
        AdminCommand::Show => {
            write!(out, "{}", render::admin(view.state()))?;
            write!(out, "{}", render::form(&view.state().form))?;
            return Ok(());
        }
        AdminCommand::Set(field, value) => {
            let form = &mut view.state_mut().form;
            match field {
                FormField::Title => form.title = value,
                FormField::Summary => form.summary = value,
                FormField::Body => form.body = value,
                FormField::Kind => form.kind = value,
                FormField::Tags => form.tags = value,
                FormField::Unlock => form.unlock_session = value,
            }
            write!(out, "{}", render::form(&view.state().form))?;
            return Ok(());
        }
        AdminCommand::Visibility(visibility) => {
            view.state_mut().form.visibility = visibility;
            write!(out, "{}", render::form(&view.state().form))?;
            return Ok(());
        }
        AdminCommand::Create => view.create().await,
        AdminCommand::Toggle(position) => {
            let Some(entry) = view.state().entry_at(position).cloned() else {
                writeln!(out, "No entry {}.", position)?;
                return Ok(());
            };
            view.toggle_visibility(&entry.id, entry.visibility).await;
        }
    }

    write!(out, "{}", render::admin(view.state()))
}
