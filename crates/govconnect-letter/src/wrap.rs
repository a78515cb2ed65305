//! Greedy word wrap for letter bodies.

/// Wrap `text` to at most `width` characters per line, preserving existing
/// line breaks (blank lines survive as paragraph spacing). Words longer than
/// the column are broken hard.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let raw_line = raw_line.trim_end_matches('\r');
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;
        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();

            if word_len > width {
                // Flush what we have, then hard-break the oversized word.
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let mut chunk = String::new();
                for (i, c) in word.chars().enumerate() {
                    if i > 0 && i % width == 0 {
                        lines.push(std::mem::take(&mut chunk));
                    }
                    chunk.push(c);
                }
                current_len = chunk.chars().count();
                current = chunk;
                continue;
            }

            let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            } else {
                if current_len > 0 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = needed;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn no_line_exceeds_width() {
        let body = "I request you to kindly look into this matter urgently and without further delay.";
        for line in wrap(body, 20) {
            assert!(line.chars().count() <= 20, "line too long: {line:?}");
        }
    }

    #[test]
    fn blank_lines_preserved_between_paragraphs() {
        assert_eq!(
            wrap("Respected Sir/Madam,\n\nThe road is damaged.", 40),
            vec!["Respected Sir/Madam,", "", "The road is damaged."]
        );
    }

    #[test]
    fn oversized_words_are_hard_broken() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrapping_keeps_every_word() {
        let body = "one two three four five six seven eight nine ten";
        let joined = wrap(body, 9).join(" ");
        assert_eq!(joined, body);
    }
}
