pub mod diagnostics;
pub mod llm_service;
pub mod output_parser;

pub use diagnostics::DiagnosticsWriter;
pub use llm_service::{ChatModel, LlmService};
pub use output_parser::parse_annotation;
