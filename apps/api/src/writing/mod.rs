pub mod cover_letter;
pub mod handlers;
pub mod optimizer;
pub mod prompts;
pub mod templates;
