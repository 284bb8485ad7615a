//! Core library for answering questions about invoices.
//!
//! This crate provides:
//! - Invoice field extraction from PDF or text documents
//! - A write-once in-memory invoice store backed by a JSON dataset
//! - Deterministic invoice queries and their natural-language formatting
//! - Tool dispatch driven by an external intent classifier (LLM)

pub mod dispatch;
pub mod error;
pub mod invoice;
pub mod llm;
pub mod models;
pub mod pdf;
pub mod query;
pub mod store;
pub mod tools;

pub use dispatch::Dispatcher;
pub use error::{DatasetError, DispatchError, InvqError, LlmError, PdfError, Result};
pub use invoice::{ExtractionResult, InvoiceParser, RuleInvoiceParser};
pub use llm::{Intent, IntentClassifier, OpenAiClassifier, StaticClassifier};
pub use models::config::InvqConfig;
pub use models::invoice::Invoice;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use store::InvoiceStore;
pub use tools::{Tool, ToolCall, ToolOutput};
