//! Interactive dashboard loop.
//!
//! Each line read from stdin is one user action. Setting inputs never
//! fetches; `fetch` performs exactly one attempt; `window` re-derives from
//! the stored table.

use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use tickview_core::{
    analysis_message, AnalysisError, Notice, PriceSource, ProviderId, Session, SessionInputs,
    SessionState, TradingDate,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{InputArgs, OutputFormat};
use crate::error::CliError;
use crate::output::Renderer;

use super::session_inputs;

const PROMPT: &str = "tickview> ";

const HELP: &[(&str, &str)] = &[
    ("ticker <SYMBOL>", "set the ticker input"),
    ("start <YYYY-MM-DD>", "set the first date to include"),
    ("end <YYYY-MM-DD>", "set the date to stop before"),
    ("fetch [SYMBOL] [START] [END]", "fetch history with the current inputs"),
    ("window <N>", "set the moving average window and redraw"),
    ("show", "redraw the dashboard"),
    ("status", "show inputs and loaded data"),
    ("help", "show this list"),
    ("quit", "leave the session"),
];

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Ticker(String),
    Start(String),
    End(String),
    Fetch {
        ticker: Option<String>,
        start: Option<String>,
        end: Option<String>,
    },
    Window(usize),
    Show,
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("ticker", [symbol]) => Self::Ticker((*symbol).to_owned()),
            ("start", [date]) => Self::Start((*date).to_owned()),
            ("end", [date]) => Self::End((*date).to_owned()),
            ("fetch", rest) if rest.len() <= 3 => Self::Fetch {
                ticker: rest.first().map(|value| (*value).to_owned()),
                start: rest.get(1).map(|value| (*value).to_owned()),
                end: rest.get(2).map(|value| (*value).to_owned()),
            },
            ("window", [value]) => Self::Window(value.parse().map_err(|_| {
                CliError::Command(format!("window must be a positive whole number: '{value}'"))
            })?),
            ("show", []) => Self::Show,
            ("status", []) => Self::Status,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            (known, _) if HELP.iter().any(|(usage, _)| usage.split(' ').next() == Some(known)) => {
                return Err(CliError::Command(format!("usage: {}", usage_of(known))));
            }
            (unknown, _) => {
                return Err(CliError::Command(format!(
                    "unknown command '{unknown}'; type 'help' for the list"
                )));
            }
        };
        Ok(Some(command))
    }
}

fn usage_of(name: &str) -> &'static str {
    HELP.iter()
        .find(|(usage, _)| usage.split(' ').next() == Some(name))
        .map_or("help", |&(usage, _)| usage)
}

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Serialize)]
struct SessionStatus {
    ticker: String,
    start: String,
    end: String,
    source: ProviderId,
    loaded: Option<LoadedData>,
}

#[derive(Debug, Serialize)]
struct LoadedData {
    ticker: String,
    rows: usize,
    window: Option<usize>,
}

impl SessionStatus {
    fn of(session: &Session) -> Self {
        let inputs = session.inputs();
        let loaded = match session.state() {
            SessionState::NoData => None,
            SessionState::HasData { ticker, table } => Some(LoadedData {
                ticker: ticker.to_string(),
                rows: table.len(),
                window: session.window().map(|window| window.get()),
            }),
        };
        Self {
            ticker: inputs.ticker.clone(),
            start: inputs.start.clone(),
            end: inputs.end.clone(),
            source: session.source().id(),
            loaded,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticker : {}", self.ticker)?;
        writeln!(f, "start  : {}", self.start)?;
        writeln!(f, "end    : {}", self.end)?;
        writeln!(f, "source : {}", self.source)?;
        match &self.loaded {
            None => write!(f, "data   : none"),
            Some(LoadedData {
                ticker,
                rows,
                window,
            }) => {
                write!(f, "data   : {rows} rows for {ticker}")?;
                match window {
                    Some(window) => write!(f, ", window {window}"),
                    None => Ok(()),
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct Help {
    commands: Vec<HelpEntry>,
}

#[derive(Debug, Serialize)]
struct HelpEntry {
    usage: &'static str,
    description: &'static str,
}

impl Help {
    fn new() -> Self {
        Self {
            commands: HELP
                .iter()
                .map(|&(usage, description)| HelpEntry { usage, description })
                .collect(),
        }
    }
}

impl fmt::Display for Help {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .commands
            .iter()
            .map(|entry| entry.usage.len())
            .max()
            .unwrap_or(0);
        writeln!(f, "Commands:")?;
        let lines = self
            .commands
            .iter()
            .map(|entry| format!("  {:<width$}  {}", entry.usage, entry.description))
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

pub async fn run(
    args: &InputArgs,
    source: Arc<dyn PriceSource>,
    renderer: &Renderer,
) -> Result<ExitCode, CliError> {
    let mut session = Session::with_inputs(source, session_inputs(args));
    let mut out = io::stdout();
    let interactive = renderer.format() == OutputFormat::Text;

    if interactive {
        writeln!(
            out,
            "tickview session ({}). Type 'help' for commands.",
            session.source().id()
        )?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                renderer.notice(&mut out, &Notice::Error(error.to_string()))?;
                continue;
            }
        };

        if execute(&mut session, command, renderer, &mut out).await? == Flow::Quit {
            break;
        }
    }

    tracing::debug!("session ended");
    Ok(ExitCode::SUCCESS)
}

/// Applies one command and writes what the dashboard shows afterwards.
pub async fn execute<W: Write>(
    session: &mut Session,
    command: SessionCommand,
    renderer: &Renderer,
    out: &mut W,
) -> Result<Flow, CliError> {
    match command {
        SessionCommand::Ticker(ticker) => {
            session.inputs_mut().ticker = ticker;
            renderer.value(out, &SessionStatus::of(session))?;
        }
        SessionCommand::Start(date) => {
            set_date(session, renderer, out, date, |inputs, date| inputs.start = date)?;
        }
        SessionCommand::End(date) => {
            set_date(session, renderer, out, date, |inputs, date| inputs.end = date)?;
        }
        SessionCommand::Fetch { ticker, start, end } => {
            let inputs = session.inputs_mut();
            if let Some(ticker) = ticker {
                inputs.ticker = ticker;
            }
            if let Some(start) = start {
                inputs.start = start;
            }
            if let Some(end) = end {
                inputs.end = end;
            }

            let notice = session.fetch().await;
            renderer.notice(out, &notice)?;
            if !notice.is_error() {
                renderer.presentation(out, &session.present())?;
            }
        }
        SessionCommand::Window(window) => match session.set_window(window) {
            Ok(_) => renderer.presentation(out, &session.present())?,
            Err(error) => {
                let message = match &error {
                    AnalysisError::Window(_) => format!(
                        "{error}; keeping window {}",
                        session.window().map_or(0, |window| window.get())
                    ),
                    _ => analysis_message(&error),
                };
                renderer.notice(out, &Notice::Error(message))?;
            }
        },
        SessionCommand::Show => renderer.presentation(out, &session.present())?,
        SessionCommand::Status => renderer.value(out, &SessionStatus::of(session))?,
        SessionCommand::Help => renderer.value(out, &Help::new())?,
        SessionCommand::Quit => return Ok(Flow::Quit),
    }

    out.flush()?;
    Ok(Flow::Continue)
}

/// Date inputs are checked as they are entered; a bad value leaves the
/// previous one in place.
fn set_date<W: Write>(
    session: &mut Session,
    renderer: &Renderer,
    out: &mut W,
    value: String,
    apply: impl FnOnce(&mut SessionInputs, String),
) -> Result<(), CliError> {
    match TradingDate::parse(&value) {
        Ok(date) => {
            apply(session.inputs_mut(), date.format_iso());
            renderer.value(out, &SessionStatus::of(session))
        }
        Err(error) => renderer.notice(out, &Notice::Error(error.to_string())),
    }
}
