//! Terminal renderers.
//!
//! ```text
//! Frame ──► TerminalRenderer ──┬── Pretty → text::write_frame (colored)
//!                              ├── Text   → text::write_frame (plain)
//!                              └── Json   → json::write_frame
//! ```

pub mod json;
pub mod text;

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::warn;
use viewer_projection::{Frame, LoadError, Renderer};

/// Output format: json, text, or pretty (default).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
    #[default]
    Pretty,
}

/// `Renderer` that writes frames to a terminal stream.
pub struct TerminalRenderer<W: Write> {
    format: OutputFormat,
    out: W,
    err: Box<dyn Write>,
}

impl TerminalRenderer<io::Stdout> {
    /// Frames to stdout, errors to stderr.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self {
            format,
            out,
            err: Box::new(io::stderr()),
        }
    }

    /// Send error reports somewhere other than stderr.
    pub fn with_error_stream(mut self, err: impl Write + 'static) -> Self {
        self.err = Box::new(err);
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one frame in the configured format.
    pub fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => json::write_frame(&mut self.out, frame)?,
            OutputFormat::Text => text::write_frame(&mut self.out, frame, false)?,
            OutputFormat::Pretty => text::write_frame(&mut self.out, frame, true)?,
        }
        self.out.flush()
    }

    /// Write an error message in the configured format.
    pub fn write_error(&mut self, message: &str, code: Option<&str>) -> io::Result<()> {
        match self.format {
            // JSON errors go to stdout so scripted callers get one stream.
            OutputFormat::Json => json::write_error(&mut self.out, message, code),
            OutputFormat::Text => text::write_error(&mut self.err, message, false),
            OutputFormat::Pretty => text::write_error(&mut self.err, message, true),
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        if let Err(e) = self.write_frame(frame) {
            warn!("Failed to write frame: {}", e);
        }
    }

    fn notify_error(&mut self, error: &LoadError) {
        if let Err(e) = self.write_error(&error.to_string(), Some(error.code())) {
            warn!("Failed to write error: {}", e);
        }
    }
}
