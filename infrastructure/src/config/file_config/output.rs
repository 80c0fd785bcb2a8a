//! `[output]` section: how responses are rendered.

use serde::{Deserialize, Serialize};
use toolcall_domain::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Format used when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Command-line choice, then the configured format, then `answer`.
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_output_section() {
        let config: FileConfig = toml::from_str(
            r#"
[output]
format = "full"
color = false
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
    }

    #[test]
    fn test_resolve_format_precedence() {
        let unset = FileOutputConfig::default();
        assert_eq!(unset.resolve_format(None), OutputFormat::Answer);

        let configured = FileOutputConfig {
            format: Some(OutputFormat::Json),
            color: true,
        };
        assert_eq!(configured.resolve_format(None), OutputFormat::Json);
        assert_eq!(configured.resolve_format(Some(OutputFormat::Full)), OutputFormat::Full);
    }
}
