//! Grab command implementation.

use crate::cli::GrabArgs;
use crate::config::Settings;
use crate::error::convert_fetch_error;
use crate::output::OutputFormatter;
use crate::progress::GrabBar;
use anyhow::Result;
use tgrab_core::ExplodeOptions;
use tgrab_core::GrabOptions;
use tgrab_core::NoopProgress;
use tgrab_core::fetch::zendesk::ZendeskClient;
use tgrab_core::grab;

pub fn execute(
    args: &GrabArgs,
    formatter: &dyn OutputFormatter,
    suppress_progress: bool,
) -> Result<()> {
    let settings = Settings::resolve(args)?;

    let client = ZendeskClient::new(
        &settings.url,
        &settings.mail,
        &settings.secret,
        settings.token_auth,
    )
    .map_err(convert_fetch_error)?;

    let options = GrabOptions {
        work_dir: settings.work_dir.clone(),
        explode: ExplodeOptions {
            max_depth: settings.max_depth,
        },
    };
    let selection = settings.selection();

    // Use a progress bar if a TTY is attached (not quiet, not JSON).
    let report = if suppress_progress || !GrabBar::should_show() {
        let mut noop = NoopProgress;
        grab(&client, &selection, &options, &mut noop).map_err(convert_fetch_error)?
    } else {
        let mut progress = GrabBar::new();
        grab(&client, &selection, &options, &mut progress).map_err(convert_fetch_error)?
    };

    if report.tickets_processed == 0 {
        formatter.format_warning("No tickets provided for attachment retrieval.");
    }

    formatter.format_grab_result(&report)?;

    Ok(())
}
