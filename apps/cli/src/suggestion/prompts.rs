// All prompt constants for the Suggestion module.

/// System prompt for suggestion generation.
pub const SUGGESTION_SYSTEM: &str =
    "You are a helpful assistant providing mental health resource suggestions.";

/// Suggestion prompt template.
/// Replace: {location}, {specialty}, {risk_level}
pub const SUGGESTION_PROMPT_TEMPLATE: &str =
    "A user is searching for mental health resources in {location}, \
     which has been identified as a '{risk_level}' area for mental health needs. \
     They are looking for support specializing in {specialty}. \
     Please suggest options, prioritizing local resources first. If no local services are available, \
     include national or online resources. Respond with empathy and support, reassuring the user \
     that help is available, especially given the mental health needs in their area.";

/// Fixed safe message shown when the completion service fails.
pub const FALLBACK_MESSAGE: &str = "Unable to provide a tailored suggestion at the moment. \
     Please refer to national helplines or online resources.";

/// Fills the suggestion template.
pub fn build_prompt(location: &str, specialty: &str, risk_level: &str) -> String {
    SUGGESTION_PROMPT_TEMPLATE
        .replace("{location}", location)
        .replace("{specialty}", specialty)
        .replace("{risk_level}", risk_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_embeds_all_context() {
        let prompt = build_prompt("Boston", "Anxiety", "Normal Risk");
        assert!(prompt.contains("Boston"));
        assert!(prompt.contains("Anxiety"));
        assert!(prompt.contains("'Normal Risk'"));
        assert!(!prompt.contains('{'), "all placeholders must be filled");
    }

    #[test]
    fn test_build_prompt_instructs_local_then_national() {
        let prompt = build_prompt("Nowhere", "Grief", "Normal Risk");
        assert!(prompt.contains("prioritizing local resources first"));
        assert!(prompt.contains("national or online resources"));
        assert!(prompt.contains("empathy"));
    }
}
