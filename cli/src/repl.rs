use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use course_search_core::HttpSuggestionClient;
use course_search_core::InputKey;
use course_search_core::InputProps;
use course_search_core::Navigator;
use course_search_core::ResetHook;
use course_search_core::SearchState;
use course_search_core::SuggestConfig;
use course_search_core::SuggestInput;
use course_search_protocol::DisplayContext;
use course_search_protocol::Suggestion;
use owo_colors::OwoColorize;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::time::Instant;

use crate::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// New full value of the input box.
    Input(String),
    Enter,
    /// 1-based index into the rendered list.
    Pick(usize),
    Context(DisplayContext),
    /// The embedding page emptied `initial_value`.
    Clear,
    Sleep(Duration),
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let Some(rest) = line.strip_prefix(':') else {
        return ReplCommand::Input(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };
    match name {
        "enter" => ReplCommand::Enter,
        "quit" | "q" => ReplCommand::Quit,
        "clear" => ReplCommand::Clear,
        "pick" => match arg.parse::<usize>() {
            Ok(index) if index > 0 => ReplCommand::Pick(index),
            _ => ReplCommand::Invalid(format!("`:pick` needs a positive index, got `{arg}`")),
        },
        "sleep" => match arg.parse::<u64>() {
            Ok(ms) => ReplCommand::Sleep(Duration::from_millis(ms)),
            Err(_) => ReplCommand::Invalid(format!("`:sleep` needs milliseconds, got `{arg}`")),
        },
        "context" => parse_context(arg),
        other => ReplCommand::Invalid(format!("unknown command `:{other}`")),
    }
}

fn parse_context(arg: &str) -> ReplCommand {
    let (kind, value) = match arg.split_once(char::is_whitespace) {
        Some((kind, value)) => (kind, value.trim()),
        None => (arg, ""),
    };
    match (kind, value) {
        ("none", _) => ReplCommand::Context(DisplayContext::default()),
        ("course", value) if !value.is_empty() => {
            ReplCommand::Context(DisplayContext::course(value))
        }
        ("professor", value) if !value.is_empty() => {
            ReplCommand::Context(DisplayContext::professor(value))
        }
        _ => ReplCommand::Invalid(format!(
            "`:context` expects `course VALUE`, `professor VALUE` or `none`, got `{arg}`"
        )),
    }
}

struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, url: &str) {
        println!("navigate {url}");
    }
}

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    /// Stop reading stdin for a while; rendering and Ctrl-C stay live.
    Pause(Duration),
    Quit,
}

pub(crate) async fn run(cli: Cli, config: SuggestConfig) -> Result<()> {
    let source = HttpSuggestionClient::new(&config).context("build suggestion client")?;
    tracing::info!(base_url = source.base_url(), "suggestion client ready");

    let reset: ResetHook = Arc::new(|| println!("reset"));
    let props = InputProps {
        initial_value: cli.initial_value,
        reset_state: Some(reset),
        course: cli.course,
        professor: cli.professor,
        route_type: cli.route_type,
    };
    let mut input = SuggestInput::new(props, Arc::new(source), Arc::new(StdoutNavigator), &config);
    let mut state_rx = input.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut rendered: Vec<Suggestion> = Vec::new();
    let mut resume_at: Option<Instant> = None;

    loop {
        tokio::select! {
            line = lines.next_line(), if resume_at.is_none() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                match apply(&mut input, parse_command(&line)) {
                    Step::Continue => {}
                    Step::Pause(duration) => resume_at = Instant::now().checked_add(duration),
                    Step::Quit => break,
                }
            }
            _ = tokio::time::sleep_until(resume_at.unwrap_or_else(Instant::now)), if resume_at.is_some() => {
                resume_at = None;
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                render(&state, &mut rendered);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    input.shutdown();
    Ok(())
}

fn apply(input: &mut SuggestInput, command: ReplCommand) -> Step {
    match command {
        ReplCommand::Input(text) => input.on_change(&text),
        ReplCommand::Enter => {
            if input.on_key(InputKey::Enter).is_none() {
                tracing::info!("no suggestions to select");
            }
        }
        ReplCommand::Pick(index) => {
            let picked = input.state().suggestions.get(index - 1).cloned();
            match picked {
                Some(suggestion) => {
                    input.select(&suggestion);
                }
                None => tracing::warn!(index, "no suggestion at that position"),
            }
        }
        ReplCommand::Context(context) => input.set_display_context(context),
        ReplCommand::Clear => input.set_initial_value(""),
        ReplCommand::Sleep(duration) => return Step::Pause(duration),
        ReplCommand::Quit => return Step::Quit,
        ReplCommand::Invalid(message) => tracing::warn!("{message}"),
    }
    Step::Continue
}

fn render(state: &SearchState, rendered: &mut Vec<Suggestion>) {
    if state.suggestions == *rendered {
        return;
    }
    rendered.clone_from(&state.suggestions);
    if rendered.is_empty() {
        println!("{}", "(no suggestions)".dimmed());
        return;
    }
    for (idx, suggestion) in rendered.iter().enumerate() {
        let tag = format!("[{}]", suggestion.category);
        println!("{:>2}. {} {}", idx + 1, suggestion.text, tag.dimmed());
    }
}
