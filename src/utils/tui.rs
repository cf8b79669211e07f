//! Text output: the result table on stdout, the banner and help on the side.

use std::io::{self, Write};

use terminal_size::{terminal_size, Width};

use crate::probe::SizeMeasurement;

/// Width of every table column
pub const COLUMN_WIDTH: usize = 16;

/// Significant digits printed for the ticks column
const TICKS_PRECISION: usize = 6;

/// Which table the sweep prints
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// size, ticks per item and the traversal result on every row
    #[default]
    PerSize,
    /// size and ticks per item; one summed result after the table
    Accumulated,
}

impl Layout {
    fn columns(self) -> usize {
        match self {
            Layout::PerSize => 3,
            Layout::Accumulated => 2,
        }
    }
}

/// Streams the result table to any writer, one row per measured size.
pub struct TableWriter<W: Write> {
    out: W,
    layout: Layout,
    total: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            total: 0,
        }
    }

    /// Header row and dashed separator.
    pub fn header(&mut self) -> io::Result<()> {
        match self.layout {
            Layout::PerSize => writeln!(
                self.out,
                "{:<w$}{:>w$}{:>w$}",
                "size_in_bytes",
                "ticks_per_item",
                "result",
                w = COLUMN_WIDTH
            )?,
            Layout::Accumulated => writeln!(
                self.out,
                "{:<w$}{:>w$}",
                "size_in_bytes",
                "ticks_per_item",
                w = COLUMN_WIDTH
            )?,
        }
        writeln!(self.out, "{}", "-".repeat(COLUMN_WIDTH * self.layout.columns()))?;
        self.out.flush()
    }

    /// One data row. Flushed right away so a long sweep shows progress.
    pub fn row(&mut self, m: &SizeMeasurement) -> io::Result<()> {
        let ticks = format_significant(m.ticks_per_hop, TICKS_PRECISION);
        match self.layout {
            Layout::PerSize => writeln!(
                self.out,
                "{:<w$}{:>w$}{:>w$}",
                m.size_bytes,
                ticks,
                m.result,
                w = COLUMN_WIDTH
            )?,
            Layout::Accumulated => {
                self.total = self.total.wrapping_add(m.result);
                writeln!(
                    self.out,
                    "{:<w$}{:>w$}",
                    m.size_bytes,
                    ticks,
                    w = COLUMN_WIDTH
                )?
            }
        }
        self.out.flush()
    }

    /// Trailing summary line, accumulated layout only.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.layout == Layout::Accumulated {
            writeln!(self.out, "(result: {})", self.total)?;
        }
        self.out.flush()
    }

    /// Running total of traversal results seen so far
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format `value` with `digits` significant digits the way a default C++
/// stream (or `%g`) does: fixed notation for exponents in `-4..digits`,
/// scientific otherwise, trailing zeros dropped either way.
///
/// `3.938123` -> `3.93812`, `119.1300` -> `119.13`, `1234567.0` -> `1.23457e+06`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    let precision = digits.max(1);
    // Rounding first, so 999999.5 is seen as 1e6
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i64 = exp.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i64 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa.to_string()),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (precision as i64 - 1 - exponent).max(0) as usize;
        trim_fraction(format!("{:.*}", decimals, value))
    }
}

/// Drop trailing zeros after the decimal point, and the point itself if bare
fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Current terminal width, clamped so the banner stays readable
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 80)
    } else {
        80
    }
}

/// Banner printed to stderr before the sweep, so stdout stays a clean table.
pub fn print_banner(unit: &str, timer: &str) {
    let width = get_term_width().saturating_sub(2);
    let title = " Cache Probe ";
    let padding = width.saturating_sub(title.len()) / 2;
    let right_padding = width.saturating_sub(padding + title.len());

    eprintln!("╔{}╗", "═".repeat(width));
    eprintln!("║{}{}{}║", " ".repeat(padding), title, " ".repeat(right_padding));
    eprintln!("╠{}╣", "═".repeat(width));
    for line in [
        format!("ticks: {} ({})", unit, timer),
        "pointer-chasing over a random single-cycle permutation".to_string(),
    ] {
        eprintln!(" {:<w$}", truncate(&line, width), w = width);
    }
    eprintln!("╚{}╝", "═".repeat(width));
    eprintln!();
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print the help message
pub fn print_help() {
    print!("{}", help_text());
}

/// Help message, including the traversal variants compiled in
pub fn help_text() -> String {
    let mut text = String::new();
    text.push_str("Usage: cache-probe [OPTIONS]\n\n");
    text.push_str("Sweeps buffer sizes from 1 KiB to 256 MiB and prints the average\n");
    text.push_str("ticks per dependent load for each size.\n\n");
    text.push_str("Options:\n");
    text.push_str("  --accumulate, -a   Print one summed traversal result after the table\n");
    text.push_str("  --quiet, -q        Do not print the banner on stderr\n");
    text.push_str("  --help, -h         Show this help message\n");
    text.push_str("  Other arguments are ignored.\n\n");
    text.push_str("Traversals:\n");
    for variant in crate::probe::code::available_variants() {
        text.push_str(&format!("  {:<18} {}\n", variant.name, variant.description));
    }
    text.push_str("\nEnvironment:\n");
    text.push_str("  RUST_LOG=debug     Log seed, hop count and pinned core per size\n");
    text
}
