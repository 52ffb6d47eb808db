//! Deterministic placeholder images.
//!
//! When image generation fails, the assistant still shows something: a solid
//! color tile whose color is derived from a SHA-256 hash of the prompt, so the
//! same prompt always yields the same placeholder.

use sha2::{Digest, Sha256};

use supergpt_types::image::{ImageReference, ImageSource};

const PLACEHOLDER_HOST: &str = "https://placehold.co";

/// Six lowercase hex digits derived from the prompt.
pub fn placeholder_color(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    format!("{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2])
}

/// Placeholder URL for `prompt` at the given square `size` (e.g. "1024x1024").
pub fn placeholder_url(prompt: &str, size: &str) -> String {
    let color = placeholder_color(prompt);
    format!("{PLACEHOLDER_HOST}/{size}/{color}/ffffff?text=SuperGPT+Image")
}

/// Build a placeholder [`ImageReference`].
///
/// `prompt` is the caller's original prompt (it determines the color);
/// `submitted_prompt` is what was, or would have been, sent to the provider.
pub fn placeholder_reference(prompt: &str, submitted_prompt: &str, size: &str) -> ImageReference {
    ImageReference {
        url: placeholder_url(prompt, size),
        source: ImageSource::Placeholder,
        submitted_prompt: submitted_prompt.to_string(),
        revised_prompt: None,
    }
}
