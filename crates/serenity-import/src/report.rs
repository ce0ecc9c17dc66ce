//! Import summary reporting.

use std::io::{self, Write};

use serenity_models::ImportSummary;
use tracing::info;

/// Print the summary to stdout.
///
/// Presentation only: write errors are ignored and nothing is returned.
pub fn report(summary: &ImportSummary) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = write_report(summary, &mut out);
    let _ = out.flush();

    info!(
        collection = %summary.collection,
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Import summary"
    );
}

/// Render the summary to any writer.
pub fn write_report<W: Write>(summary: &ImportSummary, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Import Summary ({}):", summary.collection)?;
    writeln!(out, "   Successfully imported: {}", summary.succeeded)?;
    writeln!(out, "   Errors: {}", summary.failed)?;
    writeln!(out, "   Total: {}", summary.total)?;

    if summary.has_failures() {
        writeln!(out)?;
        writeln!(out, "Failed records:")?;
        for failure in summary.failures() {
            if let serenity_models::RecordOutcome::Failed { error } = &failure.outcome {
                writeln!(out, "   #{} {}: {}", failure.index + 1, failure.title, error)?;
            }
        }
    }

    Ok(())
}
