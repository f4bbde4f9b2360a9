//! Console rendering of watcher events

use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use watcher::{EventSink, FileContent, FileEvent};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Prints one timestamped block per event
pub struct ConsoleSink<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleSink<io::Stdout> {
    /// Sink on stdout, coloured when stdout is a terminal
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self { out, color }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: FileEvent) {
        let block = render_event(&event, Local::now(), self.color);
        if let Err(e) = self.out.write_all(block.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write event for {}: {}", event.name(), e);
        }
    }
}

/// Render an event as printed on the console
///
/// ```text
/// 2024-01-03 14:30:00.000000 - File created: notes.txt
/// notes.txt:
/// <contents>
/// ```
pub fn render_event(event: &FileEvent, now: DateTime<Local>, color: bool) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let label = match event {
        FileEvent::Created { .. } => paint(color, "File created", Paint::Green),
        FileEvent::Modified { .. } => paint(color, "File modified", Paint::Yellow),
        FileEvent::Deleted { .. } => paint(color, "File deleted", Paint::Red),
    };

    let mut block = format!("{} - {}: {}\n", timestamp, label, event.name());

    match event.content() {
        Some(FileContent::Text(text)) => {
            block.push_str(&format!("{}:\n{}\n\n", event.name(), text));
        }
        Some(FileContent::ReadFailed { reason }) => {
            let marker = format!("<read failed: {}>", reason);
            block.push_str(&format!(
                "{}:\n{}\n\n",
                event.name(),
                paint(color, &marker, Paint::Dimmed)
            ));
        }
        None => {}
    }

    block
}

enum Paint {
    Green,
    Yellow,
    Red,
    Dimmed,
}

fn paint(color: bool, text: &str, style: Paint) -> String {
    if !color {
        return text.to_string();
    }
    match style {
        Paint::Green => text.green().to_string(),
        Paint::Yellow => text.yellow().to_string(),
        Paint::Red => text.red().to_string(),
        Paint::Dimmed => text.dimmed().to_string(),
    }
}
