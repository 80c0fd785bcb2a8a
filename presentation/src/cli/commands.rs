//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use toolcall_domain::{OutputFormat as ResponseFormat, QueryContext};

/// Output format for agent responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Answer plus plan, step trace and tool outcomes
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ResponseFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => ResponseFormat::Answer,
            OutputFormat::Full => ResponseFormat::Full,
            OutputFormat::Json => ResponseFormat::Json,
        }
    }
}

/// CLI arguments for toolcall-agent
#[derive(Parser, Debug)]
#[command(name = "toolcall-agent")]
#[command(author, version, about = "Answer questions by selecting and running tools")]
#[command(long_about = r#"
toolcall-agent answers a natural-language query by choosing tools,
running them with retries, and composing an answer from their results.

Tools are chosen by an OpenAI-compatible LLM when an API key is configured,
otherwise by a keyword rule table (search, calculator, weather, documents,
system, knowledge base).

Configuration files are loaded from (in priority order):
1. --config <path>                         Explicit config file
2. ./toolcall.toml or ./.toolcall.toml     Project-level config
3. ~/.config/toolcall-agent/config.toml    Global config
Environment variables prefixed TOOLCALL_ override all files
(e.g. TOOLCALL_AGENT__MAX_RETRIES=0).

Example:
  toolcall-agent "What's the weather in Tokyo?"
  toolcall-agent --no-llm "Calculate 15% of 240"
  toolcall-agent --file report.pdf "Summarize this document" -o full
"#)]
pub struct Cli {
    /// The query to answer
    pub query: Option<String>,

    /// Extra context entries (can be specified multiple times)
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_entry)]
    pub context: Vec<(String, serde_json::Value)>,

    /// Uploaded document, exposed to tools as `file_path`
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output format (defaults to the configured one, then `answer`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// List registered tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Show which tools the keyword rules would pick for QUERY and exit
    #[arg(long)]
    pub suggest: bool,

    /// Show agent information and exit
    #[arg(long)]
    pub info: bool,

    /// Never call the LLM; use the keyword rule table only
    #[arg(long)]
    pub no_llm: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Query context from `--context` entries and `--file`.
    ///
    /// `--file` wins over a `file_path` given through `--context`.
    pub fn query_context(&self) -> QueryContext {
        let mut context = QueryContext::new();
        for (key, value) in &self.context {
            context.insert(key.clone(), value.clone());
        }
        if let Some(file) = &self.file {
            context.insert("file_path", file.display().to_string());
        }
        context
    }
}

/// Parse `KEY=VALUE`. Values that parse as JSON (numbers, booleans, arrays,
/// objects, quoted strings) keep their type; anything else is a string.
pub fn parse_context_entry(s: &str) -> Result<(String, serde_json::Value), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!("invalid context entry '{}': expected KEY=VALUE", s));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid context entry '{}': empty key", s));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_context_entry() {
        assert_eq!(
            parse_context_entry("location=Paris").unwrap(),
            ("location".to_string(), json!("Paris"))
        );
        assert_eq!(
            parse_context_entry("top_k=4").unwrap(),
            ("top_k".to_string(), json!(4))
        );
        assert_eq!(
            parse_context_entry("expr=a=b").unwrap(),
            ("expr".to_string(), json!("a=b"))
        );
        assert!(parse_context_entry("novalue").is_err());
        assert!(parse_context_entry("=x").is_err());
    }

    #[test]
    fn test_query_context_file_wins() {
        let cli = Cli::parse_from([
            "toolcall-agent",
            "--context",
            "file_path=old.pdf",
            "--context",
            "units=fahrenheit",
            "--file",
            "report.pdf",
            "Summarize this document",
        ]);

        let context = cli.query_context();
        assert_eq!(context.uploaded_file(), Some("report.pdf"));
        assert_eq!(context.get("units"), Some(&json!("fahrenheit")));
        assert_eq!(cli.query.as_deref(), Some("Summarize this document"));
    }

    #[test]
    fn test_output_and_verbosity_flags() {
        let cli = Cli::parse_from(["toolcall-agent", "-o", "json", "-vv", "--no-llm", "hi"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(ResponseFormat::from(OutputFormat::Json), ResponseFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_llm);
    }
}
