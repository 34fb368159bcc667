use crate::rename::RunSummary;
use std::io::{self, Write};

/// Display dry run results in a formatted output
pub fn display_dry_run(summary: &RunSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Shows:      {}", summary.shows.len())?;
    writeln!(writer, "Operations: {}", summary.renamed_count())?;
    writeln!(writer)?;

    if summary.renamed_count() == 0 {
        writeln!(writer, "No files to rename.")?;
    } else {
        writeln!(writer, "Planned changes:")?;

        for show in summary.shows.iter().filter(|s| !s.is_empty()) {
            writeln!(writer)?;
            writeln!(writer, "  {}", show.show_name)?;

            for (i, op) in show.operations.iter().enumerate() {
                writeln!(
                    writer,
                    "  {}. {} -> {}",
                    i + 1,
                    op.detected.code(),
                    op.resolved.code()
                )?;
                writeln!(writer, "     From: {}", op.source_name)?;
                writeln!(writer, "     To:   {}", op.destination_name)?;

                if op.resolved.used_fallback {
                    writeln!(writer, "     [!] {}", op.resolved.source.description())?;
                }
            }
        }
    }

    writeln!(writer)?;
    write_counts(summary, writer)?;

    writeln!(writer)?;
    writeln!(writer, "Run without --dry-run to apply these changes.")?;

    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_execution_result(summary: &RunSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Successfully renamed {} files.",
        summary.renamed_count()
    )?;
    write_counts(summary, writer)
}

fn write_counts(summary: &RunSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;

    let verb = if summary.dry_run { "would be renamed" } else { "renamed" };
    writeln!(writer, "  {} files {}", summary.renamed_count(), verb)?;

    let unchanged = summary.unchanged_count();
    if unchanged > 0 {
        writeln!(writer, "  {} files already named correctly", unchanged)?;
    }

    let skipped = summary.skipped_count();
    if skipped > 0 {
        writeln!(writer, "  {} files skipped", skipped)?;
        for show in &summary.shows {
            for file in &show.skipped {
                writeln!(writer, "    - {} ({})", file.file_name, file.reason)?;
            }
        }
    }

    for (show, reason) in &summary.missing_shows {
        writeln!(writer, "  Show skipped: {} ({})", show, reason)?;
    }

    for (show, reason) in &summary.log_failures {
        writeln!(writer, "  Not logged: {} ({})", show, reason)?;
    }

    Ok(())
}
