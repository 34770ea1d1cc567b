//! JSON output: frames serialize as-is.

use serde_json::json;
use std::io::{self, Write};
use viewer_projection::Frame;

pub fn write_frame(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, frame)?;
    writeln!(out)
}

pub fn write_error(out: &mut impl Write, message: &str, code: Option<&str>) -> io::Result<()> {
    let value = json!({
        "error": message,
        "code": code,
    });
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)
}
