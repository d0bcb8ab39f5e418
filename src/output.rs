//! Terminal output for KWIC query results

use crate::query::RenderedLine;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Rendered occurrences for one queried term
#[derive(Debug, Clone)]
pub struct TermLines {
    /// Term as it should appear in the heading
    pub heading: String,
    pub lines: Vec<RenderedLine>,
}

fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print query results to stdout
pub fn print_term_lines(results: &[TermLines], color: bool, heading: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    write_term_lines(&mut stdout, results, heading)
}

/// Write query results, one heading per term followed by its lines
pub fn write_term_lines<W: WriteColor>(out: &mut W, results: &[TermLines], heading: bool) -> io::Result<()> {
    for (i, result) in results.iter().enumerate() {
        if heading {
            if i > 0 {
                // Blank line between terms
                writeln!(out)?;
            }
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
            writeln!(out, "{}", result.heading)?;
            out.reset()?;
        }

        for line in &result.lines {
            write_line(out, line)?;
        }
    }

    Ok(())
}

/// Write one KWIC line with the line id and center term highlighted
fn write_line<W: WriteColor>(out: &mut W, line: &RenderedLine) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", line.line_id)?;
    out.reset()?;
    write!(out, " {}", line.left)?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "{}", line.center)?;
    out.reset()?;

    writeln!(out, "{}", line.right)?;
    Ok(())
}

/// Print a count per term (for `--count`)
pub fn print_term_counts(results: &[TermLines], color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    write_term_counts(&mut stdout, results)
}

/// Write `term:count` lines
pub fn write_term_counts<W: WriteColor>(out: &mut W, results: &[TermLines]) -> io::Result<()> {
    for result in results {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", result.heading)?;
        out.reset()?;
        write!(out, ":")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "{}", result.lines.len())?;
        out.reset()?;
    }

    Ok(())
}
