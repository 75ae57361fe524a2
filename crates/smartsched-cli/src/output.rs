//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its result
//! accordingly: sectioned text for humans or stable pretty-printed JSON.
//!
//! ```ignore
//! render(mode, &report, |r, w| writeln!(w, "{} vertices", r.vertex_count))
//! ```

use std::io::{self, Write};

use serde::Serialize;

/// Shared width for human separators.
pub const RULE_WIDTH: usize = 72;

/// Write a horizontal separator.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Render a left-aligned key/value line.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<16} {}", format!("{key}:"), value.as_ref())
}

/// Output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `value` to `out` in the requested mode.
///
/// JSON mode serializes `value`; human mode delegates to `human_fn`.
pub fn render_to<T: Serialize>(
    mode: OutputMode,
    value: &T,
    out: &mut dyn Write,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, out)?,
    }
    Ok(())
}

/// Render `value` to stdout in the requested mode.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(mode, value, &mut out, human_fn)
}

/// Render a top-level error to stderr.
///
/// JSON mode writes `{"error": {"message": ..., "causes": [...]}}` so
/// scripted callers can parse failures the same way as results.
pub fn render_error(mode: OutputMode, error: &anyhow::Error) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)
}

fn write_error(mode: OutputMode, error: &anyhow::Error, out: &mut dyn Write) -> io::Result<()> {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": {
                    "message": error.to_string(),
                    "causes": causes,
                }
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)
        }
        OutputMode::Human => {
            writeln!(out, "error: {error}")?;
            for cause in causes {
                writeln!(out, "  caused by: {cause}")?;
            }
            Ok(())
        }
    }
}

/// Join vertex ids as `a -> b -> c`.
#[must_use]
pub fn arrow_path(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Join vertex ids as `a, b, c`.
#[must_use]
pub fn comma_list(items: &[usize]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
