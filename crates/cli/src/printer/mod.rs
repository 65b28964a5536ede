use std::{
    io::{self, Write},
    time::Duration,
};

use chrono::{DateTime, Local, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Enable colors when stdout is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Maximum number of rows to print.
    pub limit: usize,
    /// Print the summary line (counts, timing) on stderr.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            limit: usize::MAX,
            show_summary: true,
        }
    }
}

/// Static context about a print run.
#[derive(Debug, Default)]
pub struct PrintContext<'a> {
    /// Label for this run: "browse", "search", "recents", ...
    pub kind: &'a str,
    /// Query or path the rows answer.
    pub query: Option<&'a str>,
    /// Rows available before the limit.
    pub total: usize,
    /// Directories listed, for searches.
    pub visited_dirs: Option<usize>,
    /// Search budget ran out.
    pub truncated: bool,
    /// Search was cancelled before finishing.
    pub cancelled: bool,
    pub elapsed: Option<Duration>,
}

/// One printed row.
#[derive(Debug)]
pub struct Row<'a> {
    /// 1-based position.
    pub rank: usize,
    pub location: &'a str,
    pub name: &'a str,
    pub is_folder: bool,
    pub timestamp: Option<DateTime<Utc>>,
    /// Heading the row is printed under, when output is grouped.
    pub group: Option<&'a str>,
}

/// Receives a stream of rows bracketed by `begin` and `finish`.
pub trait RowPrinter {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;
    fn print_row(&mut self, row: &Row<'_>, ctx: &PrintContext) -> io::Result<()>;
    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

pub fn make_printer(cfg: PrinterConfig) -> Box<dyn RowPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
    }
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
    printed: usize,
    current_group: Option<String>,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// Printer over arbitrary writers; `Auto` color means no color here
    /// because a generic writer cannot be probed for a TTY.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
            printed: 0,
            current_group: None,
        }
    }

    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
            printed: 0,
            current_group: None,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn paint(&self, text: &str, is_folder: bool) -> String {
        match (self.use_color, is_folder) {
            (false, true) => format!("{text}/"),
            (false, false) => text.to_owned(),
            (true, true) => format!("\x1b[34m{text}/\x1b[0m"),
            (true, false) => format!("\x1b[32m{text}\x1b[0m"),
        }
    }
}

impl<W: Write, E: Write> RowPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &Row<'_>, _ctx: &PrintContext) -> io::Result<()> {
        if self.printed >= self.cfg.limit {
            return Ok(());
        }
        self.printed += 1;

        if let Some(group) = row.group
            && self.current_group.as_deref() != Some(group)
        {
            if self.current_group.is_some() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{group}:")?;
            self.current_group = Some(group.to_owned());
        }

        let indent = if row.group.is_some() { "  " } else { "" };
        let text = if row.group.is_some() {
            row.name
        } else {
            row.location
        };
        let painted = self.paint(text, row.is_folder);

        match row.timestamp {
            Some(ts) => {
                let local = ts.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                writeln!(self.out, "{indent}{local}  {painted}")
            }
            None => writeln!(self.out, "{indent}{painted}"),
        }
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if ctx.total > self.printed && self.printed >= self.cfg.limit {
            writeln!(self.out, "... and {} more", ctx.total - self.printed)?;
        }

        if !self.cfg.show_summary {
            return Ok(());
        }

        let mut summary = format!("\n[{}] {} results", ctx.kind, ctx.total);
        if let Some(visited) = ctx.visited_dirs {
            summary.push_str(&format!(", {visited} dirs"));
        }
        if let Some(elapsed) = ctx.elapsed {
            summary.push_str(&format!(" in {:.2}ms", elapsed.as_secs_f64() * 1000.0));
        }
        if ctx.cancelled {
            summary.push_str(" (cancelled, partial)");
        } else if ctx.truncated {
            summary.push_str(" (directory budget reached)");
        }
        writeln!(self.err, "{summary}")
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    printed: usize,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self {
            out,
            err,
            cfg,
            printed: 0,
        }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter::new(io::stdout(), io::stderr(), cfg)
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> RowPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &Row<'_>, ctx: &PrintContext) -> io::Result<()> {
        if self.printed >= self.cfg.limit {
            return Ok(());
        }
        self.printed += 1;

        let obj = serde_json::json!({
            "kind": ctx.kind,
            "query": ctx.query,
            "rank": row.rank,
            "location": row.location,
            "name": row.name,
            "is_folder": row.is_folder,
            "timestamp": row.timestamp,
            "group": row.group,
        });
        writeln!(self.out, "{obj}")
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if !self.cfg.show_summary {
            return Ok(());
        }

        let obj = serde_json::json!({
            "type": "summary",
            "kind": ctx.kind,
            "query": ctx.query,
            "total": ctx.total,
            "visited_dirs": ctx.visited_dirs,
            "truncated": ctx.truncated,
            "cancelled": ctx.cancelled,
            "elapsed_ms": ctx.elapsed.map(|d| d.as_secs_f64() * 1000.0),
        });
        writeln!(self.err, "{obj}")
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
