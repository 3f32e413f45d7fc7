//! Terminal front end commands
//!
//! One line of input maps to one [`ShellCommand`]; [`execute`] runs it
//! against the page session and returns the text to print.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::application::use_cases::SearchUseCases;
use crate::domain::search_params::{InvalidSortOption, SortOption};
use crate::ui;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    InvalidSort(#[from] InvalidSortOption),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    MinPrice(Option<i64>),
    MaxPrice(Option<i64>),
    Filter,
    Sort(SortOption),
    Next,
    Prev,
    Page(u32),
    Item { platform: String, item_id: String },
    Show,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        match name.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "min" => parse_bound(rest, "min <n> | min -").map(Self::MinPrice),
            "max" => parse_bound(rest, "max <n> | max -").map(Self::MaxPrice),
            "filter" | "f" => Ok(Self::Filter),
            "sort" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("sort <field>-<dir> | sort default"));
                }
                Ok(Self::Sort(rest.parse()?))
            }
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" => rest
                .parse::<u32>()
                .map(Self::Page)
                .map_err(|_| CommandError::InvalidPage(rest.to_string())),
            "item" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(platform), Some(item_id), None) => Ok(Self::Item {
                        platform: platform.to_string(),
                        item_id: item_id.to_string(),
                    }),
                    _ => Err(CommandError::Usage("item <platform> <itemId>")),
                }
            }
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// `-` clears the bound; otherwise a non-negative integer
fn parse_bound(arg: &str, usage: &'static str) -> Result<Option<i64>, CommandError> {
    match arg {
        "" => Err(CommandError::Usage(usage)),
        "-" => Ok(None),
        value => value
            .parse::<i64>()
            .ok()
            .filter(|price| *price >= 0)
            .map(Some)
            .ok_or_else(|| CommandError::InvalidPrice(value.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue(String),
    Quit,
}

/// Run one command and render the resulting screen
pub async fn execute(use_cases: &SearchUseCases, command: ShellCommand) -> CommandOutcome {
    debug!("Executing {:?}", command);

    match command {
        ShellCommand::Search(keyword) => use_cases.submit_search(&keyword).await,
        ShellCommand::MinPrice(bound) => use_cases.set_min_price(bound).await,
        ShellCommand::MaxPrice(bound) => use_cases.set_max_price(bound).await,
        ShellCommand::Filter => use_cases.apply_price_filter().await,
        ShellCommand::Sort(option) => use_cases.change_sort(option).await,
        ShellCommand::Next => use_cases.next_page().await,
        ShellCommand::Prev => use_cases.previous_page().await,
        ShellCommand::Page(page) => use_cases.change_page(page).await,
        ShellCommand::Item { platform, item_id } => {
            let item = use_cases.load_item_details(&platform, &item_id).await;
            return CommandOutcome::Continue(match item {
                Ok(product) => ui::render_details(&product),
                Err(_) => render_screen(use_cases).await,
            });
        }
        ShellCommand::Show => {}
        ShellCommand::Help => return CommandOutcome::Continue(ui::HELP.to_string()),
        ShellCommand::Quit => return CommandOutcome::Quit,
    }

    CommandOutcome::Continue(render_screen(use_cases).await)
}

/// Parse and run one line; parse errors are rendered, not returned
pub async fn execute_line(use_cases: &SearchUseCases, line: &str) -> CommandOutcome {
    match line.parse::<ShellCommand>() {
        Ok(command) => execute(use_cases, command).await,
        Err(e) => CommandOutcome::Continue(e.to_string()),
    }
}

/// Controls, results and pagination for the current session state
pub async fn render_screen(use_cases: &SearchUseCases) -> String {
    let state = use_cases.session().snapshot().await;
    let view = crate::application::ResultView::from_state(&state);
    format!(
        "{}\n\n{}",
        ui::render_controls(&state.params),
        ui::render_view(&view, &state.params)
    )
}
