//! Terminal rendering of counter snapshots
//!
//! Text mode prints a header whenever the active counter changes and then
//! rewrites a single odometer line in place on every tick.

use std::io::Write;

use tickboard_core::CounterSnapshot;

use crate::config::OutputMode;

/// Zero-padded whole part of `value`, at least `digits` wide
pub fn format_value(value: f64, digits: usize) -> String {
    let whole = value.abs().round();
    let text = format!("{:0width$.0}", whole, width = digits);
    if value < 0.0 && whole > 0.0 {
        format!("-{}", text)
    } else {
        text
    }
}

/// Odometer-style rendering: every digit in its own cell
pub fn odometer(value: f64, digits: usize) -> String {
    let mut line = String::from("|");
    for ch in format_value(value, digits).chars() {
        line.push(ch);
        line.push('|');
    }
    line
}

/// Title line shown when a counter becomes active
pub fn header(snapshot: &CounterSnapshot) -> String {
    if snapshot.subtitle.is_empty() {
        snapshot.title.clone()
    } else {
        format!("{} {}", snapshot.title, snapshot.subtitle)
    }
}

/// Value line for a snapshot
pub fn value_line(snapshot: &CounterSnapshot) -> String {
    let mut line = odometer(snapshot.value, snapshot.required_digits);
    if let Some(ref stamp) = snapshot.last_updated {
        line.push_str(&format!("  (switched at {})", stamp));
    }
    line
}

/// Writes snapshots to a terminal or any other sink
pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    mode: OutputMode,
    current_id: Option<String>,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            current_id: None,
        }
    }

    pub fn stdout(mode: OutputMode) -> Self {
        Self::new(Box::new(std::io::stdout()), mode)
    }

    /// Draw one snapshot. Write errors are logged, never propagated, so a
    /// closed pipe cannot take the tick task down.
    pub fn render(&mut self, snapshot: &CounterSnapshot) {
        let result = match self.mode {
            OutputMode::Text => self.render_text(snapshot),
            OutputMode::Json => self.render_json(snapshot),
        };
        if let Err(e) = result {
            log::debug!("Failed to write counter update: {}", e);
        }
    }

    fn render_text(&mut self, snapshot: &CounterSnapshot) -> std::io::Result<()> {
        if self.current_id.as_deref() != Some(snapshot.id.as_str()) {
            if self.current_id.is_some() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}", header(snapshot))?;
            self.current_id = Some(snapshot.id.clone());
        }
        // \x1b[2K clears the line so a shrinking value leaves no residue
        write!(self.out, "\r\x1b[2K{}", value_line(snapshot))?;
        self.out.flush()
    }

    fn render_json(&mut self, snapshot: &CounterSnapshot) -> std::io::Result<()> {
        let line = serde_json::to_string(snapshot)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    /// Terminate the in-place line before exiting
    pub fn finish(&mut self) {
        if self.mode == OutputMode::Text && self.current_id.is_some() {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }
}
