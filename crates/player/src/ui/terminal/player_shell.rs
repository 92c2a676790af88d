//! Player shell - load once, then answer filter commands

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::commands::{parse_player, PlayerCommand, PLAYER_HELP};
use super::render;
use crate::ui::presentation::views::PlayerView;

/// Run the player view until input ends or `#quit`.
///
/// A failed load is printed and ends the shell without reading input.
pub async fn run_player<R, W>(view: &mut PlayerView, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    view.load().await;
    write!(out, "{}", render::player(view.state()))?;
    out.flush()?;
    if !view.state().is_ready() {
        return Ok(());
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_player(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let state = view.state_mut();
        match command {
            PlayerCommand::Quit => break,
            PlayerCommand::Help => {
                writeln!(out, "{}", PLAYER_HELP)?;
                continue;
            }
            PlayerCommand::Kinds => {
                write!(out, "{}", render::kinds(state))?;
                continue;
            }
            PlayerCommand::List => {}
            PlayerCommand::Search(text) => state.set_search(text),
            PlayerCommand::Kind(kind) => state.set_kind(kind),
            PlayerCommand::Tag(tag) => state.select_tag(tag),
            PlayerCommand::Untag => state.clear_tag(),
            PlayerCommand::Clear => state.clear_filters(),
        }
        write!(out, "{}", render::results(view.state()))?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::PlayerLoreService;
    use crate::ports::outbound::MockLoreStorePort;
    use lorebook_domain::{LoreEntry, SiteState};
    use std::sync::Arc;

    async fn run(view: &mut PlayerView, input: &str) -> String {
        let mut out = Vec::new();
        run_player(view, input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn unavailable_backend_prints_error_and_stops() {
        let mut view = PlayerView::new(None);
        let output = run(&mut view, "dragon\n").await;
        assert_eq!(output, "Error: Backend client unavailable\n");
    }

    #[tokio::test]
    async fn filters_from_input_lines() {
        let mut store = MockLoreStorePort::new();
        store
            .expect_site_state()
            .times(1)
            .returning(|| Ok(Some(SiteState::new(1))));
        store.expect_list_unlocked().times(1).returning(|_| {
            Ok(vec![
                LoreEntry::new("1", "Old Ruins")
                    .with_kind("location")
                    .with_unlock_session(0),
                LoreEntry::new("2", "Dragon King")
                    .with_kind("npc")
                    .with_tags(["Relic"])
                    .with_unlock_session(1),
            ])
        });
        let service = Arc::new(PlayerLoreService::new(Arc::new(store)));
        let mut view = PlayerView::new(Some(service));

        let output = run(&mut view, "drag\n#kind location\n#clear\n#quit\n#list\n").await;

        assert!(output.starts_with("Player Lore\n"));
        assert!(output.contains("Filters: search: \"drag\"\n* Dragon King\n"));
        assert!(output.contains(
            "Filters: search: \"drag\" | kind: location\nNo entries match your filters.\n"
        ));
        // Nothing after #quit is processed
        assert!(output.ends_with("* Old Ruins\n  [location] \n* Dragon King\n  [npc] \n  #Relic\n"));
    }
}
