//! Credential resolution.
//!
//! - `env`: Environment variable provider (read-only)
//!
//! Keys are looked up in a fixed order of environment variables. Empty values
//! and obvious placeholders (the values people paste from `.env.example`
//! files) are treated as missing so the assistant can explain how to obtain a
//! real key instead of sending a doomed request.

pub mod env;

use secrecy::SecretString;

/// Variable checked first for the text provider key.
pub const TEXT_KEY_VAR: &str = "SUPERGPT_API_KEY";

/// Variable checked first for the image provider key.
pub const IMAGE_KEY_VAR: &str = "SUPERGPT_IMAGE_API_KEY";

/// A credential and the variable it came from.
pub struct ResolvedKey {
    pub env_var: String,
    pub secret: SecretString,
}

// Intentionally no Debug: the secret must never reach logs.

/// Whether `value` is empty or an obvious placeholder.
pub fn is_placeholder_key(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    normalized.is_empty()
        || normalized.starts_with("your_")
        || normalized.starts_with("your-")
        || normalized.starts_with("<")
        || matches!(
            normalized.as_str(),
            "changeme" | "change_me" | "placeholder" | "xxx" | "sk-xxx" | "none" | "null" | "todo"
        )
}

/// Environment variables consulted for the text provider, in order.
pub fn text_key_candidates(provider: &str) -> Vec<&'static str> {
    let mut candidates = vec![TEXT_KEY_VAR];
    match provider {
        "gemini" => candidates.extend(["GEMINI_API_KEY", "GOOGLE_API_KEY"]),
        "openai" => candidates.push("OPENAI_API_KEY"),
        "mistral" => candidates.push("MISTRAL_API_KEY"),
        _ => {}
    }
    candidates
}

/// Environment variables consulted for the image provider, in order.
pub fn image_key_candidates() -> Vec<&'static str> {
    vec![IMAGE_KEY_VAR, "OPENAI_API_KEY"]
}

/// First usable key among `candidates`, skipping placeholders.
pub fn resolve_key(
    candidates: &[&str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<ResolvedKey> {
    candidates.iter().find_map(|var| {
        let value = lookup(var)?;
        if is_placeholder_key(&value) {
            tracing::debug!(env_var = %var, "Ignoring placeholder API key");
            return None;
        }
        Some(ResolvedKey {
            env_var: (*var).to_string(),
            secret: SecretString::from(value.trim().to_string()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_placeholder_detection() {
        for value in ["", "   ", "your_api_key_here", "YOUR-KEY", "<api-key>", "changeme", "sk-xxx"] {
            assert!(is_placeholder_key(value), "{value:?} should be a placeholder");
        }
        for value in ["sk-proj-abc123", "AIzaSyD-real-looking"] {
            assert!(!is_placeholder_key(value), "{value:?} should be usable");
        }
    }

    #[test]
    fn test_resolve_prefers_first_usable_candidate() {
        let lookup = env(&[
            ("SUPERGPT_API_KEY", "your_api_key_here"),
            ("GEMINI_API_KEY", "AIza-real"),
        ]);
        let key = resolve_key(&text_key_candidates("gemini"), lookup).unwrap();
        assert_eq!(key.env_var, "GEMINI_API_KEY");
        assert_eq!(key.secret.expose_secret(), "AIza-real");
    }

    #[test]
    fn test_resolve_trims_value() {
        let lookup = env(&[("SUPERGPT_API_KEY", "  sk-live \n")]);
        let key = resolve_key(&text_key_candidates("openai"), lookup).unwrap();
        assert_eq!(key.secret.expose_secret(), "sk-live");
    }

    #[test]
    fn test_resolve_none_when_all_missing_or_placeholder() {
        let lookup = env(&[("OPENAI_API_KEY", "your_openai_key")]);
        assert!(resolve_key(&text_key_candidates("openai"), lookup).is_none());
    }

    #[test]
    fn test_candidates_per_provider() {
        assert_eq!(text_key_candidates("openai"), vec!["SUPERGPT_API_KEY", "OPENAI_API_KEY"]);
        assert_eq!(text_key_candidates("custom"), vec!["SUPERGPT_API_KEY"]);
        assert_eq!(image_key_candidates()[0], IMAGE_KEY_VAR);
    }
}
