//! Response sanitizer.
//!
//! Some backends wrap their JSON in markdown code fences even when told not
//! to. [`sanitize_response`] removes those fences so the parser sees the
//! payload itself.

use std::borrow::Cow;

const FENCE: &str = "```";

/// Strip code-fence markers from a backend reply.
///
/// Only text that starts with a fence (leading whitespace ignored) is
/// touched: every fence marker in it is removed, together with a language
/// tag that runs to the end of its line and the line break after it, and the
/// result is trimmed. Any other text is returned unchanged.
///
/// Sanitizing already sanitized text returns it unchanged.
pub fn sanitize_response(raw: &str) -> Cow<'_, str> {
    if !raw.trim_start().starts_with(FENCE) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(strip_fences(raw).trim().to_string())
}

fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        let tag_len = rest
            .find(|c: char| !is_tag_char(c))
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        if after_tag.starts_with('\n') || after_tag.starts_with("\r\n") {
            rest = after_tag;
        }
        rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
    }
    out.push_str(rest);
    out
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let input = "```json\n{\"score\": 20}\n```";
        assert_eq!(sanitize_response(input), "{\"score\": 20}");
    }

    #[test]
    fn strips_bare_fence() {
        let input = "```\n{\"score\": 20}\n```\n";
        assert_eq!(sanitize_response(input), "{\"score\": 20}");
    }

    #[test]
    fn leading_whitespace_before_fence() {
        let input = "\n  ```json\n{\"a\": 1}\n```  ";
        assert_eq!(sanitize_response(input), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_is_untouched() {
        let input = "  Here is the result: {\"a\": 1}  ";
        assert!(matches!(sanitize_response(input), Cow::Borrowed(_)));
        assert_eq!(sanitize_response(input), input);
    }

    #[test]
    fn fences_inside_unfenced_text_are_kept() {
        let input = "Voici:\n```json\n{\"a\": 1}\n```";
        assert_eq!(sanitize_response(input), input);
    }

    #[test]
    fn strips_every_fence_in_fenced_text() {
        let input = "```json\n{\"a\": 1}\n```\nand\n```json\n{\"b\": 2}\n```";
        assert_eq!(sanitize_response(input), "{\"a\": 1}\nand\n{\"b\": 2}");
    }

    #[test]
    fn trailing_words_after_closing_fence_survive() {
        let input = "```json\n{\"a\": 1}\n```Merci";
        assert_eq!(sanitize_response(input), "{\"a\": 1}\nMerci");
    }

    #[test]
    fn crlf_line_endings() {
        let input = "```json\r\n{\"a\": 1}\r\n```";
        assert_eq!(sanitize_response(input), "{\"a\": 1}");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "```json\n{\"score\": 20}\n```",
            "````json\n{}\n````",
            "``````",
            "```\n``\n```x`",
            "plain text",
            "   ```rust\nfn main() {}\n```   ",
            "",
            "```",
        ];
        for input in inputs {
            let once = sanitize_response(input).into_owned();
            let twice = sanitize_response(&once).into_owned();
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
