//! LLM feedback integration module

pub mod feedback;
pub mod prompts;

pub use feedback::{ChatCompletionsGenerator, FeedbackGenerator, FeedbackRequest};
