/// Result of splitting a model id off its optional variant suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedModel {
    pub model_name: String,
    /// Lowercased suffix token, when present. Not validated against the
    /// canonical level set; that is the engine's job.
    pub level: Option<String>,
}

/// Splits `"gpt-5(xhigh)"` into `("gpt-5", Some("xhigh"))`.
///
/// The suffix must be a parenthesized, non-empty ASCII-alphabetic token at
/// the end of the string; interior whitespace is trimmed. Anything else
/// leaves the input untouched as the model name. Never errors.
pub fn parse_suffix(model: &str) -> ParsedModel {
    if let Some(rest) = model.strip_suffix(')') {
        if let Some(open) = rest.rfind('(') {
            let token = rest[open + 1..].trim();
            if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic()) {
                return ParsedModel {
                    model_name: rest[..open].to_string(),
                    level: Some(token.to_ascii_lowercase()),
                };
            }
        }
    }
    ParsedModel {
        model_name: model.to_string(),
        level: None,
    }
}
