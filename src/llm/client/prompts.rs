//! Prompt templates for sentiment classification.

/// Name of the function the model is forced to call.
pub const SENTIMENT_FUNCTION_NAME: &str = "analyze_sentiment";

/// System instruction. `{sentiments}` is replaced with the comma-joined taxonomy.
pub const SENTIMENT_SYSTEM_PROMPT: &str = r#"You are a sentiment analysis assistant specialized in detecting emotions in text.
Break the user text into logical segments and analyze the sentiment of each segment.
For each segment, identify all applicable sentiments from this specific list:
{sentiments}

Return the results in a structured format using the analyze_sentiment function.
Make sure to only use sentiments from the provided list."#;

/// User message. `{content}` is replaced with the chunk text.
pub const SENTIMENT_USER_PROMPT: &str = "Analyze the sentiment in this text: {content}";
