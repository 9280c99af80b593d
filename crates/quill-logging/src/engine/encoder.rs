//! Line encoders
//!
//! JSON: one object per line, fixed keys first, then fields in order
//! (duplicates preserved), stacktrace last.
//! Console: tab-separated header columns followed by the fields as a JSON
//! object, with the stacktrace on the following lines.

use super::Record;
use crate::options::Format;
use crate::severity::Severity;
use quill_core_types::schema::{
    KEY_CALLER, KEY_LEVEL, KEY_LOGGER, KEY_MESSAGE, KEY_STACKTRACE, KEY_TIMESTAMP,
    TIMESTAMP_FORMAT,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Encoder {
    Json,
    Console { color: bool },
}

impl Encoder {
    pub fn new(format: Format, color: bool) -> Self {
        match format {
            Format::Json => Encoder::Json,
            Format::Console => Encoder::Console { color },
        }
    }

    pub fn encode(&self, record: &Record<'_>) -> serde_json::Result<Vec<u8>> {
        match self {
            Encoder::Json => encode_json(record),
            Encoder::Console { color } => encode_console(record, *color),
        }
    }
}

/// Writes `"key":value` pairs into an open JSON object
struct ObjectWriter {
    buf: Vec<u8>,
    first: bool,
}

impl ObjectWriter {
    fn open(buf: Vec<u8>) -> Self {
        let mut buf = buf;
        buf.push(b'{');
        Self { buf, first: true }
    }

    fn entry<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> serde_json::Result<()> {
        if !self.first {
            self.buf.push(b',');
        }
        self.first = false;
        serde_json::to_writer(&mut self.buf, key)?;
        self.buf.push(b':');
        serde_json::to_writer(&mut self.buf, value)
    }

    fn close(mut self) -> Vec<u8> {
        self.buf.push(b'}');
        self.buf
    }
}

fn encode_json(record: &Record<'_>) -> serde_json::Result<Vec<u8>> {
    let mut obj = ObjectWriter::open(Vec::with_capacity(256));
    obj.entry(
        KEY_TIMESTAMP,
        &record.time.format(TIMESTAMP_FORMAT).to_string(),
    )?;
    obj.entry(KEY_LEVEL, &record.severity.label())?;
    if let Some(name) = record.logger {
        obj.entry(KEY_LOGGER, name)?;
    }
    if let Some(caller) = &record.caller {
        obj.entry(KEY_CALLER, &caller.short())?;
    }
    obj.entry(KEY_MESSAGE, record.message)?;
    for field in record.all_fields() {
        obj.entry(field.key(), field.value())?;
    }
    if let Some(stack) = &record.stack {
        obj.entry(KEY_STACKTRACE, stack)?;
    }

    let mut line = obj.close();
    line.push(b'\n');
    Ok(line)
}

fn encode_console(record: &Record<'_>, color: bool) -> serde_json::Result<Vec<u8>> {
    let mut columns = vec![
        record.time.format(TIMESTAMP_FORMAT).to_string(),
        level_text(record.severity, color),
    ];
    if let Some(name) = record.logger {
        columns.push(name.to_string());
    }
    if let Some(caller) = &record.caller {
        columns.push(caller.short());
    }
    columns.push(record.message.to_string());

    let mut line = columns.join("\t").into_bytes();

    let mut fields = record.all_fields().peekable();
    if fields.peek().is_some() {
        line.push(b'\t');
        let mut obj = ObjectWriter::open(line);
        for field in fields {
            obj.entry(field.key(), field.value())?;
        }
        line = obj.close();
    }

    line.push(b'\n');
    if let Some(stack) = &record.stack {
        line.extend_from_slice(stack.as_bytes());
        if !stack.ends_with('\n') {
            line.push(b'\n');
        }
    }
    Ok(line)
}

fn level_text(severity: Severity, color: bool) -> String {
    let label = severity.label();
    if !color {
        return label;
    }
    let code = match severity {
        s if s >= Severity::ERROR => 31,
        Severity::WARN => 33,
        Severity::INFO => 34,
        _ => 35,
    };
    format!("\x1b[{}m{}\x1b[0m", code, label)
}
