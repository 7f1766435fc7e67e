//! Fixed generation settings for the simplification call.
//!
//! None of these are caller-controlled.

/// System-level instruction sent with every simplification request.
pub const SYSTEM_PROMPT: &str = "You are a medical education assistant.
Your job is to rephrase medical or device instructions into plain, easy-to-understand language.
- Use simple terms and short sentences.
- Define medical words using reputable sources like WebMD or Harvard Health.
- Never remove or change safety warnings.
- Never give personal medical advice or make recommendations.
- If a step seems unclear, say: \"Ask your healthcare provider for clarification.\"
- Always include: (Source: Educational summary, not medical advice.)";

/// Attribution line the model is instructed to include.
pub const SOURCE_ATTRIBUTION: &str = "(Source: Educational summary, not medical advice.)";

pub const TEMPERATURE: f32 = 0.2;

pub const MAX_TOKENS: u32 = 800;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_safety_contract() {
        assert!(SYSTEM_PROMPT.contains("Never remove or change safety warnings."));
        assert!(SYSTEM_PROMPT.contains("Never give personal medical advice"));
        assert!(SYSTEM_PROMPT.contains("Ask your healthcare provider for clarification."));
        assert!(SYSTEM_PROMPT.ends_with(SOURCE_ATTRIBUTION));
    }
}
