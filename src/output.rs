//! Terminal rendering of records, search results and statistics.

use crate::index::IndexStats;
use crate::normalize::NormalizedBatch;
use crate::record::StudentRecord;
use memchr::memmem;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stream(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print ranked search results, one record per block, with the matched
/// part of the display name highlighted.
pub fn print_results(results: &[&StudentRecord], query: &str, color: bool) -> io::Result<()> {
    let mut stdout = stream(color);

    if results.is_empty() {
        writeln!(stdout, "no results")?;
        return Ok(());
    }

    let query_lower = query.trim().to_lowercase();
    for record in results {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{:>10}", record.dossier)?;
        stdout.reset()?;
        write!(stdout, "  ")?;
        print_highlighted(&mut stdout, record.display_name(), &query_lower)?;

        let mut details: Vec<String> = Vec::new();
        if !record.name_ar.is_empty() && !record.name_fr.is_empty() {
            details.push(record.name_fr.clone());
        }
        if !record.series.is_empty() {
            details.push(record.series.clone());
        }
        if record.score != 0.0 {
            details.push(format!("{:.2}", record.score));
        }
        if !record.decision.is_empty() {
            details.push(record.decision.clone());
        }
        if !record.wilaya_fr.is_empty() {
            details.push(record.wilaya_fr.clone());
        }
        if !details.is_empty() {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            writeln!(stdout, "{:>10}  {}", "", details.join(" | "))?;
            stdout.reset()?;
        }
    }

    Ok(())
}

/// Write a name with the query occurrence highlighted. Matching is
/// case-insensitive; when lowercasing shifts byte offsets the name prints
/// unhighlighted rather than sliced wrong.
fn print_highlighted(stdout: &mut StandardStream, text: &str, query_lower: &str) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_bold(true))?;

    let lower = text.to_lowercase();
    let hit = if !query_lower.is_empty() && lower.len() == text.len() {
        memmem::find(lower.as_bytes(), query_lower.as_bytes())
    } else {
        None
    };

    if let Some(start) = hit {
        let end = start + query_lower.len();
        if text.is_char_boundary(start) && text.is_char_boundary(end) {
            write!(stdout, "{}", &text[..start])?;
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(stdout, "{}", &text[start..end])?;
            stdout.reset()?;
            stdout.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(stdout, "{}", &text[end..])?;
            stdout.reset()?;
            return Ok(());
        }
    }

    writeln!(stdout, "{text}")?;
    stdout.reset()?;
    Ok(())
}

/// Print one record in full, for point lookups. Empty fields are skipped.
pub fn print_record(record: &StudentRecord, color: bool) -> io::Result<()> {
    let mut stdout = stream(color);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "{:<16}", "Dossier:")?;
    stdout.reset()?;
    writeln!(stdout, "{}", record.dossier)?;

    field(&mut stdout, "Name (FR):", &record.name_fr)?;
    field(&mut stdout, "Name (AR):", &record.name_ar)?;
    field(&mut stdout, "Born:", &record.birth_date)?;
    field(&mut stdout, "Birthplace:", &record.birthplace_fr)?;
    field(&mut stdout, "Birthplace (AR):", &record.birthplace_ar)?;
    field(&mut stdout, "Series:", &record.series)?;
    field(&mut stdout, "Category:", &record.category)?;
    if record.score != 0.0 {
        writeln!(stdout, "{:<16}{:.2}", "Score:", record.score)?;
    }
    field(&mut stdout, "Decision:", &record.decision)?;
    field(&mut stdout, "Wilaya:", &record.wilaya_fr)?;
    field(&mut stdout, "Wilaya (AR):", &record.wilaya_ar)?;
    field(&mut stdout, "Center:", &record.exam_center)?;
    field(&mut stdout, "School:", &record.school_fr)?;
    field(&mut stdout, "School (AR):", &record.school_ar)?;

    Ok(())
}

fn field(stdout: &mut StandardStream, label: &str, value: &str) -> io::Result<()> {
    if !value.is_empty() {
        writeln!(stdout, "{label:<16}{value}")?;
    }
    Ok(())
}

/// Print the summary of a normalization run: resolved columns and row
/// counters.
pub fn print_ingest_summary(batch: &NormalizedBatch) -> io::Result<()> {
    let mut stdout = io::stdout();

    writeln!(stdout, "Column mapping ({} fields):", batch.mapping.len())?;
    for (field, header) in batch.mapping.mapped() {
        writeln!(stdout, "  {:<14} <- {}", field.name(), header)?;
    }

    writeln!(stdout)?;
    writeln!(stdout, "Rows read:        {}", batch.rows_in)?;
    writeln!(stdout, "Records kept:     {}", batch.records.len())?;
    writeln!(stdout, "Rows dropped:     {}", batch.rows_dropped)?;

    Ok(())
}

/// Print index statistics.
pub fn print_stats(stats: &IndexStats) -> io::Result<()> {
    let mut stdout = io::stdout();

    writeln!(stdout, "Index Statistics")?;
    writeln!(stdout, "================")?;
    writeln!(stdout)?;
    writeln!(stdout, "Records:          {}", stats.records)?;
    writeln!(stdout, "Skipped records:  {}", stats.skipped)?;
    writeln!(stdout, "Distinct names:   {} fr, {} ar", stats.names_fr, stats.names_ar)?;
    writeln!(stdout, "Indexed tokens:   {} fr, {} ar", stats.tokens_fr, stats.tokens_ar)?;

    Ok(())
}
