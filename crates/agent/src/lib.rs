//! Agent runtime - classification and context-assembly pipeline
//!
//! This crate is the "brain" of the botify system. For every inbound
//! message it:
//! - Extracts a structured intent from natural language (`classifier`)
//! - Resolves supporting catalog data through the dispatcher (`runtime`)
//! - Assembles a bounded conversational context (`context`)
//! - Generates the reply through the completion API (`reply`)
//!
//! # Architecture
//!
//! The pipeline is a single-level decision, not a multi-turn state machine:
//! 1. **Intent Extraction** (`classifier`) - one single-shot completion call,
//!    parsed line-by-line into an `IntentAnalysis`
//! 2. **Data Resolution** (`runtime`) - catalog lookups per intent branch
//! 3. **Reply Generation** (`reply`) - language detection, protocol
//!    selection, context assembly, one completion call
//!
//! # Key Types
//!
//! - `AgentRuntime` - the dispatcher (see `runtime` module)
//! - `LlmClient` - pluggable completion-API seam (`GroqClient` in production)
//! - `CatalogSource` - pluggable catalog seam (`CatalogClient` in production)

pub mod classifier;
pub mod context;
pub mod language;
pub mod llm;
pub mod protocol;
pub mod reply;
pub mod runtime;

pub use classifier::IntentClassifier;
pub use context::ContextAssembler;
pub use language::detect_language;
pub use llm::{GroqClient, LlmClient, LlmError};
pub use protocol::get_protocol;
pub use reply::ReplyGenerator;
pub use runtime::{AgentError, AgentRuntime, CatalogSource};
