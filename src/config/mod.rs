//! Reads and writes the INI-style `config` file found in a git directory.
//!
//! A `Config` is an ordered, two-level mapping of section name to key to
//! string value. Names are compared case-sensitively and values are kept
//! as the strings found on disk. Sections and keys this crate doesn't
//! know about are preserved so that a load followed by a save doesn't
//! lose anything another tool wrote.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

use crate::repo::{Error, Result};

mod parse;
pub use parse::ParseConfigError;

/// One `[name]` block of a config file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Section {
        Section {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Return the section name as it appears between the brackets.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(key, value)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

/// In-memory snapshot of a repository's `config` file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    sections: Vec<Section>,
}

impl Config {
    /// Create an empty config with no sections.
    pub fn new() -> Config {
        Config::default()
    }

    /// The config written into a freshly initialized repository.
    pub fn for_new_repository() -> Config {
        let mut config = Config::new();
        config.set("core", "repositoryformatversion", "0");
        config.set("core", "filemode", "false");
        config.set("core", "bare", "false");
        config
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Config> {
        tracing::debug!(path = %path.display(), "Loading config");

        let bytes = fs::read(path)?;
        Config::from_bytes(&bytes).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write this config to `path`, replacing any existing file.
    ///
    /// The text is written to a temporary file next to `path` which is then
    /// renamed over the destination, so a reader sees either the old
    /// file or the new one.
    pub fn save(&self, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), "Saving config");

        let write_err = |source: io::Error| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Same mode a plain `fs::write` would get: 0666 filtered by the umask.
        // `tempfile` defaults to 0600.
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        let mut temp = builder.tempfile_in(dir).map_err(write_err)?;
        temp.write_all(self.to_string().as_bytes())
            .map_err(write_err)?;

        temp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Iterate over sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Return the section called `name`, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Return the value of `key` in `section`, if present.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Set `key` in `section` to `value`.
    ///
    /// The section is appended if it doesn't exist yet. An existing key keeps
    /// its position and has its value replaced.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut(section).set(key, value);
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };

        &mut self.sections[index]
    }

    /// `core.repositoryformatversion`, uninterpreted.
    pub fn format_version(&self) -> Option<&str> {
        self.get("core", "repositoryformatversion")
    }

    /// `core.filemode`. `None` if absent or not a recognizable boolean.
    pub fn file_mode(&self) -> Option<bool> {
        self.get("core", "filemode").and_then(parse_bool)
    }

    /// `core.bare`. `None` if absent or not a recognizable boolean.
    pub fn bare(&self) -> Option<bool> {
        self.get("core", "bare").and_then(parse_bool)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{}={}", key, value)?;
            }
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
