//! Style suffix applied to image prompts before submission.

/// Appended to every image prompt that has room for it.
pub const STYLE_SUFFIX: &str = ", high quality, professional interior design, photorealistic";

/// Longest prompt the image provider accepts, in characters.
pub const MAX_PROMPT_LENGTH: usize = 4000;

/// Append [`STYLE_SUFFIX`] unless the result would exceed [`MAX_PROMPT_LENGTH`].
///
/// Over-long results fall back to the original prompt unchanged.
pub fn apply_style_suffix(prompt: &str) -> String {
    let styled_len = prompt.chars().count() + STYLE_SUFFIX.chars().count();
    if styled_len > MAX_PROMPT_LENGTH {
        prompt.to_string()
    } else {
        format!("{prompt}{STYLE_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompt_gets_suffix() {
        let styled = apply_style_suffix("walnut dining table");
        assert_eq!(
            styled,
            "walnut dining table, high quality, professional interior design, photorealistic"
        );
    }

    #[test]
    fn prompt_at_exact_limit_gets_suffix() {
        let prompt = "a".repeat(MAX_PROMPT_LENGTH - STYLE_SUFFIX.len());
        let styled = apply_style_suffix(&prompt);
        assert_eq!(styled.chars().count(), MAX_PROMPT_LENGTH);
        assert!(styled.ends_with(STYLE_SUFFIX));
    }

    #[test]
    fn long_prompt_is_left_unmodified() {
        let prompt = "a".repeat(MAX_PROMPT_LENGTH - STYLE_SUFFIX.len() + 1);
        assert_eq!(apply_style_suffix(&prompt), prompt);
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        // 'é' is two bytes in UTF-8 but one character.
        let prompt = "é".repeat(MAX_PROMPT_LENGTH - STYLE_SUFFIX.len());
        assert!(apply_style_suffix(&prompt).ends_with(STYLE_SUFFIX));
    }
}
