use crate::index::reader::IndexReader;
use anyhow::{Context, Result};
use std::path::Path;

/// Display index statistics
pub fn show_stats(index_path: &Path) -> Result<()> {
    let reader = IndexReader::open(index_path)
        .with_context(|| format!("Failed to open index {}", index_path.display()))?;
    let index = reader.index();
    let meta = index.meta();

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index location:   {}", reader.path().display());
    println!("Index version:    {}", meta.version);
    println!("Window width:     {}", meta.width.get());
    println!("Separator:        {:?}", meta.separator);
    println!("Lines scanned:    {}", meta.line_count);
    println!("Terms:            {}", index.term_count());
    println!("Occurrences:      {}", index.occurrence_count());

    let arity_counts = count_by_arity(index.terms(), meta.separator);
    println!();
    println!("Terms by length:");
    for (arity, count) in arity_counts.iter().enumerate().skip(1) {
        println!("  {}-gram          {}", arity, count);
    }

    println!();
    println!("Index size:       {}", format_size(reader.file_size()));
    println!("Created:          {}", format_timestamp(meta.created_at));

    Ok(())
}

/// List indexed terms alphabetically with their occurrence counts
pub fn list_terms(index_path: &Path) -> Result<()> {
    let reader = IndexReader::open(index_path)
        .with_context(|| format!("Failed to open index {}", index_path.display()))?;
    let index = reader.index();

    if index.is_empty() {
        println!("No terms indexed.");
        return Ok(());
    }

    let terms = index.terms();
    let column = terms.iter().map(|t| t.chars().count()).max().unwrap_or(0);
    for term in terms {
        println!("{:<column$}  {}", term, index.occurrences(term).len());
    }

    Ok(())
}

/// Counts of terms per arity; slot 0 is unused
fn count_by_arity<'a>(terms: impl IntoIterator<Item = &'a str>, separator: char) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for term in terms {
        let arity = crate::index::types::term_arity(term, separator).min(3);
        counts[arity] += 1;
    }
    counts
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format unix timestamp
fn format_timestamp(ts: u64) -> String {
    use std::time::{Duration, UNIX_EPOCH};
    let datetime = UNIX_EPOCH + Duration::from_secs(ts);
    format!("{:?}", datetime)
}
