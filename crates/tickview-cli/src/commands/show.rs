use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tickview_core::{AnalysisError, Presentation, PriceSource, Session};

use crate::cli::ShowArgs;
use crate::error::CliError;
use crate::output::Renderer;

use super::session_inputs;

/// Exit code when the fetch fails or the dashboard cannot be derived.
const EXIT_NO_DASHBOARD: u8 = 3;

pub async fn run(
    args: &ShowArgs,
    source: Arc<dyn PriceSource>,
    renderer: &Renderer,
) -> Result<ExitCode, CliError> {
    let mut session = Session::with_inputs(source, session_inputs(&args.inputs));
    let notice = session.fetch().await;

    let mut out = io::stdout().lock();
    renderer.notice(&mut out, &notice)?;
    if notice.is_error() {
        return Ok(ExitCode::from(EXIT_NO_DASHBOARD));
    }

    // Too few rows is reported by the presentation below.
    if let Some(window) = args.window {
        if let Err(AnalysisError::Window(error)) = session.set_window(window) {
            return Err(CliError::Validation(error));
        }
    }

    let presentation = session.present();
    renderer.presentation(&mut out, &presentation)?;
    out.flush()?;

    match presentation {
        Presentation::Dashboard(_) => Ok(ExitCode::SUCCESS),
        Presentation::NoData | Presentation::Unavailable { .. } => {
            Ok(ExitCode::from(EXIT_NO_DASHBOARD))
        }
    }
}
