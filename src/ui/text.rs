/// Greedy word wrap on character count. Words longer than `width` are split
/// hard so a pathological token cannot blow the layout.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let mut buf = String::new();
            for (i, c) in word.chars().enumerate() {
                if i > 0 && i % width == 0 {
                    lines.push(std::mem::take(&mut buf));
                }
                buf.push(c);
            }
            current = buf;
            current_len = current.chars().count();
            continue;
        }
        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap("uno dos tres cuatro", 8);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("hola", 40), vec!["hola"]);
    }

    #[test]
    fn oversized_word_is_split() {
        let lines = wrap("supercalifragilistico", 6);
        assert!(lines.iter().all(|l| l.chars().count() <= 6));
        assert_eq!(lines.concat(), "supercalifragilistico");
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }
}
