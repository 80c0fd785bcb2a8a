//! `pdf_summarizer_tool`: extractive summary of an uploaded document.
//!
//! PDF text extraction needs the `pdf-tools` feature (enabled by default).
//! Plain-text documents (`.txt`, `.md`, ...) are read directly either way.
//!
//! The summary picks sentences from the beginning, middle and end of the
//! text; `length` controls how many (`short` 3, `medium` 5, `long` 8).

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use toolcall_domain::agent::rules::PDF_SUMMARIZER_TOOL;
use toolcall_domain::core::string::{squash_whitespace, truncate};
use toolcall_domain::{ParamType, ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};
use tracing::{debug, warn};

use super::args::{opt_str, require_str};

const TEXT_EXTENSIONS: [&str; 5] = ["txt", "md", "markdown", "text", "rst"];
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_KEY_POINTS: usize = 5;
const KEY_TERMS: [&str; 8] = [
    "important",
    "key",
    "significant",
    "main",
    "primary",
    "conclusion",
    "result",
    "finding",
];

/// Summary size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    pub fn sentences(self) -> usize {
        match self {
            Self::Short => 3,
            Self::Medium => 5,
            Self::Long => 8,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PdfSummarizerTool;

impl PdfSummarizerTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolHandler for PdfSummarizerTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            PDF_SUMMARIZER_TOOL,
            "Extract the text of a PDF (or plain-text) document and return an extractive summary with key points",
        )
        .with_parameter(ToolParameter::new(
            "file_path",
            "Path to the uploaded document",
            true,
        ))
        .with_parameter(
            ToolParameter::new("length", "Summary length", false)
                .with_enum(["short", "medium", "long"])
                .with_default("medium"),
        )
        .with_output(ToolParameter::new("summary", "Extractive summary", true))
        .with_output(
            ToolParameter::new("key_points", "Key sentences", true).with_type(ParamType::Array),
        )
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<Value, ToolError> {
        let file_path = require_str(arguments, "file_path")?;
        let length = opt_str(arguments, "length")
            .and_then(SummaryLength::parse)
            .unwrap_or(SummaryLength::Medium);

        let path = PathBuf::from(file_path);
        if !path.is_file() {
            return Err(ToolError::not_found(file_path));
        }

        debug!(file_path, length = length.as_str(), "Summarizing document");
        let text = tokio::task::spawn_blocking({
            let path = path.clone();
            move || extract_text(&path)
        })
        .await
        .map_err(|e| ToolError::execution_failed(format!("Text extraction aborted: {}", e)))??;

        if text.trim().is_empty() {
            return Err(ToolError::execution_failed(
                "Could not extract text from the document or it is empty",
            ));
        }

        let summary = summarize(&text, length)?;
        Ok(json!({
            "file_path": file_path,
            "length": length.as_str(),
            "word_count": text.split_whitespace().count(),
            "summary": summary.text,
            "key_points": summary.key_points,
        }))
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn extract_text(path: &Path) -> Result<String, ToolError> {
    if is_pdf(path) {
        return extract_pdf(path);
    }

    let is_text = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| TEXT_EXTENSIONS.contains(&e.as_str()));
    if !is_text {
        return Err(ToolError::invalid_argument(format!(
            "Unsupported document type: {} (expected .pdf or a text file)",
            path.display()
        )));
    }

    std::fs::read_to_string(path).map_err(|e| {
        ToolError::execution_failed(format!("Failed to read {}: {}", path.display(), e))
    })
}

#[cfg(feature = "pdf-tools")]
fn extract_pdf(path: &Path) -> Result<String, ToolError> {
    pdf_extract::extract_text(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "PDF extraction failed");
        ToolError::execution_failed(format!("PDF processing error: {}", e))
    })
}

#[cfg(not(feature = "pdf-tools"))]
fn extract_pdf(path: &Path) -> Result<String, ToolError> {
    warn!(path = %path.display(), "PDF support not compiled in");
    Err(ToolError::execution_failed(
        "PDF support is not enabled in this build (feature `pdf-tools`)",
    ))
}

/// Extractive summary of a text.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub text: String,
    pub key_points: Vec<String>,
}

fn split_sentences(text: &str) -> Result<Vec<String>, ToolError> {
    let sentence = match Regex::new(r"[^.!?]+[.!?]*") {
        Ok(re) => re,
        Err(e) => {
            return Err(ToolError::execution_failed(format!(
                "Invalid sentence pattern: {}",
                e
            )));
        }
    };

    let flattened = squash_whitespace(text);
    Ok(sentence
        .find_iter(&flattened)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect())
}

/// Pick sentences from the beginning, middle and end of `text`.
pub fn summarize(text: &str, length: SummaryLength) -> Result<Summary, ToolError> {
    let sentences = split_sentences(text)?;
    let wanted = length.sentences();

    let picked: Vec<String> = if sentences.len() <= wanted {
        sentences.clone()
    } else {
        let begin = wanted / 3;
        let middle = wanted / 3;
        let end = wanted - begin - middle;
        let middle_start = sentences.len() / 2 - middle / 2;

        let mut picked = sentences[..begin].to_vec();
        picked.extend_from_slice(&sentences[middle_start..middle_start + middle]);
        picked.extend_from_slice(&sentences[sentences.len() - end..]);
        picked
    };

    let mut key_points: Vec<String> = sentences
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| KEY_TERMS.contains(&word))
        })
        .take(MAX_KEY_POINTS)
        .cloned()
        .collect();

    // No key terms: first sentence of each paragraph
    if key_points.is_empty() {
        key_points = text
            .split("\n\n")
            .filter_map(|para| split_sentences(para).ok()?.into_iter().next())
            .take(MAX_KEY_POINTS)
            .collect();
    }

    let text = if picked.is_empty() {
        truncate(&squash_whitespace(text), 300)
    } else {
        picked.join(" ")
    };

    Ok(Summary { text, key_points })
}
