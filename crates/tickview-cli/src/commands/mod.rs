mod session;
mod show;

use std::process::ExitCode;
use std::sync::Arc;

use tickview_core::{PriceSource, SessionInputs, SyntheticSource, YahooSource};

use crate::cli::{Cli, Command, InputArgs, SourceSelector};
use crate::error::CliError;
use crate::output::Renderer;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let source = build_source(cli.source, cli.timeout_ms);
    let renderer = Renderer::from_cli(cli);
    tracing::debug!(source = %source.id(), "price source selected");

    match &cli.command {
        Command::Session(args) => session::run(args, source, &renderer).await,
        Command::Show(args) => show::run(args, source, &renderer).await,
    }
}

fn build_source(selector: SourceSelector, timeout_ms: u64) -> Arc<dyn PriceSource> {
    match selector {
        SourceSelector::Yahoo => Arc::new(YahooSource::default().with_timeout_ms(timeout_ms)),
        SourceSelector::Synthetic => Arc::new(SyntheticSource),
    }
}

fn session_inputs(args: &InputArgs) -> SessionInputs {
    SessionInputs {
        ticker: args.ticker.clone(),
        start: args.start.clone(),
        end: args.end.clone(),
    }
}
