//! `rag_tool`: document retrieval with an extractive answer.
//!
//! Documents live in an in-memory [`DocumentStore`] seeded with a handful of
//! sample documents. Retrieval scores each document by keyword overlap: the
//! fraction of the question's content words that occur in the document.
//! The answer is the sentence of the best document sharing the most words
//! with the question.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `question` | string | Yes | Question to answer |
//! | `top_k` | integer | No | Documents to retrieve (1-10, default 3) |
//! | `min_score` | number | No | Minimum overlap score (0-1, default 0.3) |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;
use toolcall_domain::agent::rules::RAG_TOOL;
use toolcall_domain::core::string::truncate;
use toolcall_domain::{ParamType, ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};
use tracing::debug;

use super::args::{opt_f64, opt_u64, require_str};

const DEFAULT_TOP_K: usize = 3;
const MAX_TOP_K: usize = 10;
const DEFAULT_MIN_SCORE: f64 = 0.3;
const CONTENT_PREVIEW_CHARS: usize = 500;

pub const NO_DOCUMENTS_ANSWER: &str = "No relevant documents found to answer the question.";

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from", "how",
    "i", "in", "is", "it", "me", "of", "on", "or", "such", "tell", "that", "the", "their", "these",
    "this", "to", "was", "what", "when", "where", "which", "who", "why", "with", "about",
];

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A retrieved document with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f64,
}

/// Lowercased content words of `text`.
fn keywords(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .map(|w| normalize(&w))
        .collect()
}

/// Crude plural folding so "documents" matches "document".
fn normalize(word: &str) -> String {
    match word.strip_suffix('s') {
        Some(stem) if stem.len() > 3 && !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}

/// In-memory keyword-overlap document index.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the sample documents.
    pub fn with_samples() -> Self {
        let store = Self::new();
        for doc in sample_documents() {
            store.add(doc);
        }
        store
    }

    /// Add a document, replacing any document with the same id.
    pub fn add(&self, document: Document) {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());
        documents.retain(|d| d.id != document.id);
        documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Documents scoring at least `min_score`, best first, at most `top_k`.
    /// Ties keep insertion order.
    pub fn search(&self, question: &str, top_k: usize, min_score: f64) -> Vec<ScoredDocument> {
        let query = keywords(question);
        if query.is_empty() {
            return Vec::new();
        }

        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        let mut scored: Vec<ScoredDocument> = documents
            .iter()
            .map(|doc| {
                let words = keywords(&doc.content);
                let hits = query.iter().filter(|w| words.contains(*w)).count();
                ScoredDocument {
                    document: doc.clone(),
                    score: hits as f64 / query.len() as f64,
                }
            })
            .filter(|s| s.score > 0.0 && s.score >= min_score)
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

/// Sentence of the best document sharing the most words with the question.
pub fn extractive_answer(question: &str, retrieved: &[ScoredDocument]) -> String {
    let Some(best) = retrieved.first() else {
        return NO_DOCUMENTS_ANSWER.to_string();
    };

    let query = keywords(question);
    let sentences: Vec<&str> = best
        .document
        .content
        .split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut best_sentence = None;
    let mut best_overlap = 0;
    for sentence in &sentences {
        let overlap = keywords(sentence).intersection(&query).count();
        if overlap > best_overlap {
            best_overlap = overlap;
            best_sentence = Some(*sentence);
        }
    }

    let answer = best_sentence
        .map(String::from)
        .unwrap_or_else(|| sentences.iter().take(2).copied().collect::<Vec<_>>().join(" "));
    format!("Based on the retrieved documents: {}", answer)
}

pub struct RagTool {
    store: DocumentStore,
}

impl RagTool {
    /// Tool over the sample document store.
    pub fn new() -> Self {
        Self::with_store(DocumentStore::with_samples())
    }

    pub fn with_store(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

impl Default for RagTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for RagTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            RAG_TOOL,
            "Search the document store for passages relevant to a question and answer from them",
        )
        .with_parameter(ToolParameter::new(
            "question",
            "The question to search for and answer",
            true,
        ))
        .with_parameter(
            ToolParameter::new("top_k", "Number of documents to retrieve", false)
                .with_type(ParamType::Integer)
                .with_range(Some(1.0), Some(MAX_TOP_K as f64))
                .with_default(DEFAULT_TOP_K),
        )
        .with_parameter(
            ToolParameter::new("min_score", "Minimum relevance score", false)
                .with_type(ParamType::Number)
                .with_range(Some(0.0), Some(1.0))
                .with_default(DEFAULT_MIN_SCORE),
        )
        .with_output(ToolParameter::new("answer", "Extractive answer", true))
        .with_output(
            ToolParameter::new("retrieved_documents", "Matching documents", true)
                .with_type(ParamType::Array),
        )
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<Value, ToolError> {
        let question = require_str(arguments, "question")?;
        let top_k = opt_u64(arguments, "top_k")
            .map(|k| (k as usize).clamp(1, MAX_TOP_K))
            .unwrap_or(DEFAULT_TOP_K);
        let min_score = opt_f64(arguments, "min_score").unwrap_or(DEFAULT_MIN_SCORE);

        let retrieved = self.store.search(question, top_k, min_score);
        debug!(question, retrieved = retrieved.len(), "Retrieved documents");

        let answer = extractive_answer(question, &retrieved);
        let documents: Vec<Value> = retrieved
            .iter()
            .map(|s| {
                json!({
                    "id": s.document.id,
                    "content": truncate(&s.document.content, CONTENT_PREVIEW_CHARS),
                    "score": (s.score * 1000.0).round() / 1000.0,
                    "metadata": s.document.metadata,
                })
            })
            .collect();

        Ok(json!({
            "question": question,
            "answer": answer,
            "retrieved_documents": documents,
            "total_documents": self.store.len(),
            "summary": answer,
        }))
    }
}

fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(
            "doc_1",
            "Artificial Intelligence (AI) is a branch of computer science that aims to create intelligent machines that work and react like humans. AI systems can perform tasks such as visual perception, speech recognition, decision-making, and language translation.",
        )
        .with_metadata("source", "ai_basics.txt")
        .with_metadata("category", "technology"),
        Document::new(
            "doc_2",
            "Machine Learning is a subset of AI that provides systems the ability to automatically learn and improve from experience without being explicitly programmed. It focuses on the development of computer programs that can access data and use it to learn for themselves.",
        )
        .with_metadata("source", "ml_overview.txt")
        .with_metadata("category", "technology"),
        Document::new(
            "doc_3",
            "Climate change refers to long-term shifts in global temperatures and weather patterns. While climate variations are natural, scientific evidence shows that human activities have been the main driver of climate change since the 1800s.",
        )
        .with_metadata("source", "climate_info.txt")
        .with_metadata("category", "environment"),
        Document::new(
            "doc_4",
            "Renewable energy comes from natural sources that are constantly replenished, such as sunlight, wind, rain, tides, waves, and geothermal heat. These energy sources are sustainable and help reduce greenhouse gas emissions.",
        )
        .with_metadata("source", "renewable_energy.txt")
        .with_metadata("category", "environment"),
        Document::new(
            "doc_5",
            "Rust is a systems programming language focused on safety, speed, and concurrency. Its ownership model guarantees memory safety without a garbage collector, making it popular for command-line tools, network services, and embedded software.",
        )
        .with_metadata("source", "rust_guide.txt")
        .with_metadata("category", "programming"),
    ]
}
