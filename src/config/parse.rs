use std::str::FromStr;

use thiserror::Error;

use super::Config;

/// An error which can be returned when parsing the text of a git config file.
///
/// Each variant carries the 1-based line number where parsing stopped.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseConfigError {
    /// A `key = value` line appeared before the first `[section]` header.
    #[error("line {0}: entry appears before any section header")]
    EntryOutsideSection(usize),

    /// Section header is missing its closing `]`, has an empty name,
    /// or is followed by something other than a comment.
    #[error("line {0}: malformed section header")]
    BadSectionHeader(usize),

    /// Line is neither a header, a comment, nor a `key = value` entry.
    #[error("line {0}: expected `key = value`")]
    MissingEquals(usize),

    #[error("line {0}: entry has an empty key")]
    EmptyKey(usize),

    /// File content is not valid UTF-8.
    #[error("line {0}: invalid UTF-8")]
    InvalidUtf8(usize),
}

impl Config {
    /// Parse raw config file content.
    pub fn from_bytes(bytes: &[u8]) -> Result<Config, ParseConfigError> {
        let text = std::str::from_utf8(bytes).map_err(|err| {
            let valid = &bytes[..err.valid_up_to()];
            ParseConfigError::InvalidUtf8(valid.iter().filter(|&&b| b == b'\n').count() + 1)
        })?;

        text.parse()
    }
}

impl FromStr for Config {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Config::new();
        let mut section: Option<String> = None;

        for (index, raw_line) in s.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || is_comment(line) {
                continue;
            }

            if line.starts_with('[') {
                let name = section_name(line).ok_or(ParseConfigError::BadSectionHeader(line_no))?;
                config.section_mut(name);
                section = Some(name.to_string());
                continue;
            }

            let section = section
                .as_deref()
                .ok_or(ParseConfigError::EntryOutsideSection(line_no))?;

            let (key, value) = line
                .split_once('=')
                .ok_or(ParseConfigError::MissingEquals(line_no))?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ParseConfigError::EmptyKey(line_no));
            }

            config.set(section, key, value.trim());
        }

        Ok(config)
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

// Returns the trimmed text between `[` and `]`. Subsection headers such as
// `[remote "origin"]` are kept verbatim.
fn section_name(line: &str) -> Option<&str> {
    let end = line.find(']')?;
    let name = line[1..end].trim();
    let rest = line[end + 1..].trim();

    if name.is_empty() || !(rest.is_empty() || is_comment(rest)) {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_style_config() {
        let text = "# written by git\n[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n\n[remote \"origin\"]\n\turl = https://example.com/repo.git\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n";

        let config = Config::from_str(text).unwrap();

        assert_eq!(config.get("core", "repositoryformatversion"), Some("0"));
        assert_eq!(config.get("core", "logallrefupdates"), Some("true"));
        assert_eq!(
            config.get("remote \"origin\"", "fetch"),
            Some("+refs/heads/*:refs/remotes/origin/*")
        );

        let names: Vec<&str> = config.sections().map(|s| s.name()).collect();
        assert_eq!(names, vec!["core", "remote \"origin\""]);
    }

    #[test]
    fn reopened_section_merges() {
        let config = Config::from_str("[core]\nbare=false\n[user]\nname=x\n[core]\nbare=true\nfilemode=false\n").unwrap();

        assert_eq!(config.sections().count(), 2);
        assert_eq!(config.get("core", "bare"), Some("true"));
        assert_eq!(config.get("core", "filemode"), Some("false"));

        let keys: Vec<&str> = config.section("core").unwrap().entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["bare", "filemode"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let config = Config::from_str("[Core]\nBare=true\n").unwrap();
        assert_eq!(config.get("core", "bare"), None);
        assert_eq!(config.get("Core", "Bare"), Some("true"));
    }

    #[test]
    fn value_may_contain_equals() {
        let config = Config::from_str("[alias]\nlg = log --format=oneline\n").unwrap();
        assert_eq!(config.get("alias", "lg"), Some("log --format=oneline"));
    }

    #[test]
    fn header_with_trailing_comment() {
        let config = Config::from_str("[core] ; main section\nbare=false\n").unwrap();
        assert_eq!(config.get("core", "bare"), Some("false"));
    }

    #[test]
    fn entry_outside_section() {
        let err = Config::from_str("\nbare = false\n").unwrap_err();
        assert_eq!(err, ParseConfigError::EntryOutsideSection(2));
        assert_eq!(
            err.to_string(),
            "line 2: entry appears before any section header"
        );
    }

    #[test]
    fn bad_section_headers() {
        assert_eq!(
            Config::from_str("[core\n").unwrap_err(),
            ParseConfigError::BadSectionHeader(1)
        );
        assert_eq!(
            Config::from_str("[core]\nbare=false\n[ ]\n").unwrap_err(),
            ParseConfigError::BadSectionHeader(3)
        );
        assert_eq!(
            Config::from_str("[core] junk\n").unwrap_err(),
            ParseConfigError::BadSectionHeader(1)
        );
    }

    #[test]
    fn missing_equals() {
        let err = Config::from_str("[core]\nbare\n").unwrap_err();
        assert_eq!(err, ParseConfigError::MissingEquals(2));
    }

    #[test]
    fn empty_key() {
        let err = Config::from_str("[core]\n = false\n").unwrap_err();
        assert_eq!(err, ParseConfigError::EmptyKey(2));
    }

    #[test]
    fn invalid_utf8() {
        let err = Config::from_bytes(b"[core]\nrepositoryformatversion=0\nname=\xff\xfe\n").unwrap_err();
        assert_eq!(err, ParseConfigError::InvalidUtf8(3));
        assert_eq!(err.to_string(), "line 3: invalid UTF-8");
    }

    #[test]
    fn from_bytes() {
        let config = Config::from_bytes(b"[core]\nbare = true\n").unwrap();
        assert_eq!(config.bare(), Some(true));
    }

    #[test]
    fn empty_text() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::new());
    }
}
