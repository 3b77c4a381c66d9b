//! Event scripts.
//!
//! A script is a JSON-lines file: one feed event per line. Blank lines and
//! lines starting with `#` are skipped. Line numbers are kept so errors and
//! reports point back into the file.

use crate::error::{ReplayError, Result};
use nailfeed_engine::{posts_from_json, FeedEvent, PostRecord};
use std::fs;
use std::path::Path;

/// An event together with the script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    /// 1-based line number
    pub line: usize,
    pub event: FeedEvent,
}

/// Parse a whole script. Fails on the first bad line.
pub fn parse_script(input: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let event =
            FeedEvent::from_json(text).map_err(|source| ReplayError::Parse { line, source })?;
        event
            .validate()
            .map_err(|source| ReplayError::Parse { line, source })?;

        events.push(ScriptEvent { line, event });
    }

    Ok(events)
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    parse_script(&read(path)?)
}

/// Read the initial post list.
pub fn load_seed(path: &Path) -> Result<Vec<PostRecord>> {
    Ok(posts_from_json(&read(path)?)?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}
