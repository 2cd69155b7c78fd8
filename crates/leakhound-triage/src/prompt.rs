//! LLM prompt engineering for leak classification

/// Builds prompts asking the model to judge a candidate secret
pub struct PromptBuilder {
    context: String,
    secret_value: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for one candidate
    pub fn new(context: impl Into<String>, secret_value: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            secret_value: secret_value.into(),
        }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role and judgment criteria
        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The evidence
        prompt.push_str("Code snippet context:\n");
        prompt.push_str("```\n");
        prompt.push_str(&self.context);
        prompt.push_str("\n```\n\n");

        prompt.push_str("Potential secret value:\n");
        prompt.push_str(&self.secret_value);
        prompt.push_str("\n\n");

        // 3. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const ANALYSIS_INSTRUCTIONS: &str = r#"You are a Senior Security Analyst specializing in Data Loss Prevention (DLP) reviewing code snippets for leaked secrets.
Analyze the following potential secret value found within the code snippet context.
Determine if the value looks like a REAL, ACTIVE credential (API key, token, password) or if it is likely a FALSE POSITIVE (placeholder, example, test data, deactivated key format, identifier, configuration value).

Consider factors like:
- Key patterns (common prefixes like sk_live_, AKIA, etc.)
- Entropy/randomness of the string
- Surrounding code (variable names like 'api_key', 'password'; comments mentioning 'test' or 'example')
- Common placeholder formats (e.g., 'YOUR_API_KEY_HERE', 'xxxxxxxx')"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Provide your analysis STRICTLY in this format:
CONFIDENCE: [High | Medium | Low | None]
REASONING: [Your brief explanation justifying the confidence level. Be concise.]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_context_and_value() {
        let builder = PromptBuilder::new("api_key = AbCdEf123", "AbCdEf123");
        let prompt = builder.build();

        assert!(prompt.contains("api_key = AbCdEf123"));
        assert!(prompt.contains("Potential secret value:\nAbCdEf123"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = PromptBuilder::new("ctx", "value").build();

        assert!(prompt.contains("Senior Security Analyst"));
        assert!(prompt.contains("FALSE POSITIVE"));
    }

    #[test]
    fn test_prompt_demands_two_line_format() {
        let prompt = PromptBuilder::new("ctx", "value").build();

        assert!(prompt.contains("CONFIDENCE: [High | Medium | Low | None]"));
        assert!(prompt.contains("REASONING:"));
    }

    #[test]
    fn test_context_is_fenced() {
        let prompt = PromptBuilder::new("line one\nline two", "value").build();
        assert!(prompt.contains("```\nline one\nline two\n```"));
    }
}
