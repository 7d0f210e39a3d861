//! Input sanitizing for text that reaches the language model.

/// Maximum characters kept after sanitizing.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Characters stripped from user input before prompt interpolation.
const STRIPPED: &[char] = &['<', '>', '{', '}', '[', ']', '\\'];

/// Sanitize free text destined for a prompt.
///
/// Removes every occurrence of ``< > { } [ ] \``, trims surrounding
/// whitespace, and caps the result at [`MAX_PROMPT_CHARS`] characters.
/// Pure and idempotent; never fails.
pub fn sanitize(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !STRIPPED.contains(c)).collect();
    let trimmed = stripped.trim();

    let capped: String = trimmed.chars().take(MAX_PROMPT_CHARS).collect();
    // Truncation can expose trailing whitespace; trim again so a second
    // pass is a no-op.
    capped.trim_end().to_string()
}
