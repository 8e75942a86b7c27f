pub mod analyzer;
pub mod completeness;
pub mod handlers;
pub mod prompts;
pub mod vocabulary;
