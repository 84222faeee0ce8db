//! LLM integration.

mod client;

pub use client::{
    FunctionSpec, LlmClient, LlmConfig, LlmError, LlmProvider, PromptMessage,
    SENTIMENT_FUNCTION_NAME, SENTIMENT_SYSTEM_PROMPT, SENTIMENT_USER_PROMPT,
};
