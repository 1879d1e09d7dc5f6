use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct MirrorEntry {
    /// The server token exactly as written in the file.
    pub raw: String,
}

#[derive(PartialEq, Eq, Debug, Default)]
pub struct MirrorList {
    /// Keyed by `scheme://host`, the join key against the status report.
    entries: HashMap<String, MirrorEntry>,
}

impl MirrorList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MirrorEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Reduces a server url to `scheme://host`. Port, path and credentials are
/// dropped. Host-less urls such as `file:///srv/mirror` reduce to `scheme://`.
pub fn host_key(server: &str) -> Option<String> {
    let url = Url::parse(server).ok()?;
    let host = url.host_str().unwrap_or_default();
    Some(format!("{}://{}", url.scheme(), host))
}

pub fn read_mirrorlist(path: &Path) -> Result<MirrorList> {
    debug!("Parsing mirrorlist {}", path.display());
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!("cannot read mirrorlist {}: {e}", path.display()))
    })?;
    let list = parse_mirrorlist(&contents)?;
    if list.is_empty() {
        return Err(Error::EmptyInput(path.to_path_buf()));
    }
    debug!("{} servers configured", list.len());
    trace!("configured hosts: {:?}", list.keys().collect::<Vec<_>>());
    Ok(list)
}

/// Every non-comment line must look like `Server = <url>`; anything else aborts
/// the parse instead of being guessed at.
pub fn parse_mirrorlist(contents: &str) -> Result<MirrorList> {
    let mut entries = HashMap::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(server) = line.split_whitespace().nth(2) else {
            return Err(Error::Configuration(format!(
                "line {}: expected `Server = <url>`, got `{line}`",
                number + 1
            )));
        };
        let key = host_key(server).ok_or_else(|| {
            Error::Configuration(format!(
                "line {}: `{server}` is not a server url",
                number + 1
            ))
        })?;
        // last one wins
        entries.insert(
            key,
            MirrorEntry {
                raw: server.to_string(),
            },
        );
    }
    Ok(MirrorList { entries })
}
