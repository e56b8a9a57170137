//! Miette-based error diagnostics for CLI error presentation.
//!
//! A config file that fails to parse is shown with the offending TOML
//! underlined; every other error is a single line on stderr.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use super::output;
use crate::error::{ConfigError, Error};

const CONFIG_HELP: &str =
    "run `appraisal config show` after fixing to confirm the effective values";

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(appraisal::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic for a TOML parse failure in `src`.
    #[must_use]
    pub fn from_toml(path: &Path, src: String, err: &toml::de::Error) -> Self {
        let span = err
            .span()
            .map_or((0, 0), |range| (range.start, range.len()));
        Self {
            message: format!("invalid configuration: {}", err.message()),
            src: NamedSource::new(path.display().to_string(), src),
            span: span.into(),
            help: Some(CONFIG_HELP.to_string()),
        }
    }
}

/// Print `err` for the user: a miette report for config parse failures in
/// human mode, one line otherwise.
pub fn report(err: &Error, config_path: &Path) {
    if !output::is_json() {
        if let Error::Config(ConfigError::Parse(parse)) = err {
            if let Ok(src) = std::fs::read_to_string(config_path) {
                let diagnostic = ConfigDiagnostic::from_toml(config_path, src, parse);
                eprintln!("{:?}", miette::Report::new(diagnostic));
                return;
            }
        }
    }
    output::error(&err.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_points_at_bad_value() {
        let src = "[database]\npool_size = \"many\"\n".to_string();
        let err = toml::from_str::<crate::infrastructure::config::Config>(&src).unwrap_err();

        let diagnostic = ConfigDiagnostic::from_toml(Path::new("config.toml"), src.clone(), &err);
        let offset = diagnostic.span.offset();
        assert!(offset >= src.find("pool_size").unwrap());
        assert!(diagnostic.message.starts_with("invalid configuration"));
        assert_eq!(diagnostic.help.as_deref(), Some(CONFIG_HELP));
    }
}
