//! Input record discovery and loading
//!
//! Records are numbered from zero with a five-digit zero-padded suffix;
//! the first missing index ends input. Two file conventions exist, chosen
//! by `--mode`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use sqs_dispatch::{Attribute, Message};
use tracing::debug;

/// Input file conventions
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// `payload.NNNNN` + `attribs.NNNNN` per record; attributes are
    /// newline-delimited `name=value` lines
    Pairs,
    /// `message.NNNNN` per record; the whole file is the payload and its
    /// path is recorded as a single `src` attribute
    Single,
}

/// Loads the record at `index`, or `None` when the next expected file does
/// not exist (end of input)
///
/// # Errors
///
/// Any I/O failure other than the next file being absent
pub fn load_record(in_dir: &Path, index: u64, mode: InputMode) -> Result<Option<Message>> {
    match mode {
        InputMode::Pairs => load_pair(in_dir, index),
        InputMode::Single => load_single(in_dir, index),
    }
}

fn load_pair(in_dir: &Path, index: u64) -> Result<Option<Message>> {
    let payload_name = in_dir.join(format!("payload.{index:05}"));
    let attribs_name = in_dir.join(format!("attribs.{index:05}"));

    let Some(payload) = read_or_end(&payload_name)? else {
        return Ok(None);
    };
    let Some(attribs) = read_or_end(&attribs_name)? else {
        return Ok(None);
    };

    let text = String::from_utf8(attribs)
        .with_context(|| format!("{} is not valid UTF-8", attribs_name.display()))?;
    let attributes = parse_attributes(&text, &attribs_name);

    Ok(Some(Message {
        attributes,
        payload,
    }))
}

fn load_single(in_dir: &Path, index: u64) -> Result<Option<Message>> {
    let message_name = in_dir.join(format!("message.{index:05}"));

    let Some(payload) = read_or_end(&message_name)? else {
        return Ok(None);
    };

    let attributes = vec![Attribute::new("src", message_name.to_string_lossy())];
    Ok(Some(Message {
        attributes,
        payload,
    }))
}

/// Reads a whole file, mapping "does not exist" to `None`. The handle is
/// scoped to the read and closed on every path.
fn read_or_end(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Parses newline-delimited `name=value` lines, splitting on the first `=`
/// only. Lines without a delimiter are skipped; a final line without a
/// trailing newline still counts.
fn parse_attributes(text: &str, source: &Path) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    for line in text.lines() {
        match line.split_once('=') {
            Some((name, value)) => attributes.push(Attribute::new(name, value)),
            None if line.is_empty() => {}
            None => debug!("Skipping attribute line without '=' in {}", source.display()),
        }
    }
    attributes
}
