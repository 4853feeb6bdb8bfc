//! Explode command implementation.

use crate::cli::ExplodeArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use tgrab_core::ExplodeOptions;
use tgrab_core::ExplodeReport;
use tgrab_core::explode;

pub fn execute(args: &ExplodeArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let options = ExplodeOptions {
        max_depth: args.max_depth,
    };

    let mut report = ExplodeReport::new();
    for file in &args.files {
        report.merge(explode(file, &options));
    }

    formatter.format_explode_result(&report)?;

    Ok(())
}
