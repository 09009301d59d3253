//! .env file parsing.
//!
//! Projects keep local toggles such as `USE_LOCAL_MOCO=true` in a `.env`
//! file next to `package.json`. This module reads that file in the
//! standard KEY=value format.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{BxplanError, Result};

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Exported: `export KEY=value`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use bxplan::config::EnvFileParser;
///
/// let content = r#"
/// # Local mock service
/// USE_LOCAL_MOCO="true"
/// export NODE_ENV=production
/// EMPTY=
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("USE_LOCAL_MOCO"), Some(&"true".to_string()));
/// assert_eq!(vars.get("NODE_ENV"), Some(&"production".to_string()));
/// assert_eq!(vars.get("EMPTY"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into a map of variables.
    ///
    /// Lines that are not `KEY=value` pairs are ignored. When a key repeats,
    /// the last assignment wins.
    pub fn parse(content: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = Self::parse_line(line) {
                vars.insert(key, value);
            }
        }

        vars
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let eq_pos = line.find('=')?;
        let key = line[..eq_pos].trim();
        if key.is_empty() {
            return None;
        }
        let value = Self::unquote(line[eq_pos + 1..].trim());

        Some((key.to_string(), value))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path).map_err(|e| BxplanError::EnvFileParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(&content))
    }

    /// Load and parse an env file, returning an empty map if it doesn't exist.
    pub fn load_optional(path: &Path) -> Result<HashMap<String, String>> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No env file at {}", path.display());
            Ok(HashMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_simple_env_file() {
        let content = r#"
USE_LOCAL_MOCO=true
NODE_ENV=production
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("USE_LOCAL_MOCO"), Some(&"true".to_string()));
        assert_eq!(vars.get("NODE_ENV"), Some(&"production".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = r#"
# mock service toggle

USE_LOCAL_MOCO=false
# trailing comment
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="double quoted"
SINGLE='single quoted'
UNQUOTED=no quotes
LONE="
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(vars.get("UNQUOTED"), Some(&"no quotes".to_string()));
        assert_eq!(vars.get("LONE"), Some(&"\"".to_string()));
    }

    #[test]
    fn strips_export_prefix() {
        let vars = EnvFileParser::parse("export USE_LOCAL_MOCO=true");
        assert_eq!(vars.get("USE_LOCAL_MOCO"), Some(&"true".to_string()));
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = EnvFileParser::parse("MOCO_URL=http://localhost:3000/?a=b");
        assert_eq!(
            vars.get("MOCO_URL"),
            Some(&"http://localhost:3000/?a=b".to_string())
        );
    }

    #[test]
    fn ignores_lines_without_key() {
        let content = "=orphan\nnot a pair\nKEY=value";
        let vars = EnvFileParser::parse(content);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn last_assignment_wins() {
        let vars = EnvFileParser::parse("KEY=first\nKEY=second");
        assert_eq!(vars.get("KEY"), Some(&"second".to_string()));
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "USE_LOCAL_MOCO=true\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("USE_LOCAL_MOCO"), Some(&"true".to_string()));
    }

    #[test]
    fn load_missing_file_is_error() {
        let err = EnvFileParser::load(Path::new("/nonexistent/path/.env")).unwrap_err();
        assert!(matches!(err, BxplanError::EnvFileParse { .. }));
    }

    #[test]
    fn load_optional_returns_empty_for_missing_file() {
        let result = EnvFileParser::load_optional(Path::new("/nonexistent/path/.env"));

        assert!(result.unwrap().is_empty());
    }
}
