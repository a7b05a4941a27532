/// HTML-escape the characters that matter inside a mail template:
/// `& < > " ' /`. Applied to the outgoing payload only; the on-screen draft
/// keeps what the user typed.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn ampersand_is_not_double_escaped() {
        assert_eq!(escape_html("a & b &amp; c"), "a &amp; b &amp;amp; c");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_html("hola, ¿qué tal?"), "hola, ¿qué tal?");
    }

    #[test]
    fn quotes_and_slashes() {
        assert_eq!(escape_html("it's a/b"), "it&#x27;s a&#x2F;b");
    }
}
