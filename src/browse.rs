use crate::render;
use anyhow::{anyhow, Context};
use core_types::{PageSize, QueryParameters};
use database::ResultsSource;
use engine::{FetchTicket, ResultsFetcher, ViewSession, ViewSnapshot};
use indicatif::ProgressBar;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  name <athlete>   show only results for this exact athlete name
  name             clear the athlete filter
  rows <n>         rows per page (50, 100, 500 or 1000)
  reload           fetch the current search again
  help             show this help
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Name(String),
    Rows(PageSize),
    Reload,
    Help,
    Quit,
}

/// Runs an interactive session: stdin changes the search, the table is redrawn
/// every time the session state changes.
pub async fn run(source: Arc<dyn ResultsSource>, initial: QueryParameters) -> anyhow::Result<()> {
    let session = Arc::new(ViewSession::new(ResultsFetcher::new(source)));
    let mut updates = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut spinner = None;

    println!("{HELP}");
    issue(&session, session.set_parameters(initial.clone()));
    show(&updates.borrow_and_update(), &mut spinner);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                show(&snapshot, &mut spinner);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                let current = session.snapshot().parameters.unwrap_or_else(|| initial.clone());
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(Command::Reload)) => issue(&session, session.refresh()),
                    Ok(Some(Command::Name(name))) => {
                        issue(&session, session.set_parameters(current.with_name_filter(name)))
                    }
                    Ok(Some(Command::Rows(page_size))) => {
                        issue(&session, session.set_parameters(current.with_page_size(page_size)))
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
    }

    if let Some(spinner) = spinner.take() {
        spinner.finish_and_clear();
    }
    Ok(())
}

/// Starts the fetch for `ticket` without waiting for it, so a newer search can
/// be issued while it is in flight.
fn issue(session: &Arc<ViewSession>, ticket: Option<FetchTicket>) {
    if let Some(ticket) = ticket {
        let session = Arc::clone(session);
        tokio::spawn(async move {
            session.run(ticket).await;
        });
    }
}

fn show(snapshot: &ViewSnapshot, spinner: &mut Option<ProgressBar>) {
    if snapshot.state.is_loading() {
        if spinner.is_none() {
            println!("{}", render::describe(snapshot));
            *spinner = Some(render::spinner());
        }
        return;
    }
    if let Some(spinner) = spinner.take() {
        spinner.finish_and_clear();
    }
    println!("{}", render::describe(snapshot));
    println!("{}", render::render(snapshot));
}

fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(' ') {
        Some((keyword, rest)) => (keyword, rest),
        None => (line, ""),
    };

    let command = match keyword {
        // The filter is an exact match, so the name is taken verbatim.
        "name" => Command::Name(rest.to_string()),
        "rows" => Command::Rows(rest.parse().map_err(|_| {
            anyhow!("Rows per page must be one of 50, 100, 500 or 1000 (got '{rest}')")
        })?),
        "reload" => Command::Reload,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(anyhow!("Unknown command '{other}'. Type 'help' for a list.")),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_keeps_the_text_verbatim() {
        assert_eq!(
            parse_command("name Jane Doe").unwrap(),
            Some(Command::Name("Jane Doe".to_string()))
        );
        assert_eq!(
            parse_command("name  padded ").unwrap(),
            Some(Command::Name(" padded ".to_string()))
        );
        assert_eq!(
            parse_command("name").unwrap(),
            Some(Command::Name(String::new()))
        );
    }

    #[test]
    fn rows_accepts_only_offered_page_sizes() {
        assert_eq!(
            parse_command("rows 500").unwrap(),
            Some(Command::Rows(PageSize::FiveHundred))
        );
        assert!(parse_command("rows 42").is_err());
        assert!(parse_command("rows").is_err());
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("reload\r").unwrap(), Some(Command::Reload));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert!(parse_command("delete everything").is_err());
    }
}
