pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
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

pub fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if max_len == 1 {
        return "…".to_string();
    }

    if s.char_indices().nth(max_len).is_none() {
        return s.to_string();
    }

    let take = max_len - 1;
    let cut = s.char_indices().nth(take).map(|(idx, _)| idx).unwrap_or(0);

    let mut out = String::with_capacity(cut + '…'.len_utf8());
    out.push_str(&s[..cut]);
    out.push('…');
    out
}

/// A `^` under the character starting at byte `pos` of `text`.
///
/// Padding counts characters, not bytes, so the caret lines up under
/// non-ASCII formulas printed above it.
pub fn caret_line(text: &str, pos: usize) -> String {
    let column = text
        .char_indices()
        .take_while(|&(idx, _)| idx < pos)
        .count();
    format!("{}^", " ".repeat(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_long_text() {
        let result = wrap("the quick brown fox", 10);
        assert_eq!(result, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_empty_text() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_long() {
        assert_eq!(truncate("no element symbol matches", 8), "no elem…");
    }

    #[test]
    fn truncate_unicode() {
        assert_eq!(truncate("Ca₃(PO₄)₂", 4), "Ca₃…");
    }

    #[test]
    fn caret_under_position() {
        assert_eq!(caret_line("H2O", 0), "^");
        assert_eq!(caret_line("Mg(OH", 2), "  ^");
    }

    #[test]
    fn caret_counts_characters() {
        assert_eq!(caret_line("Hé)", 3), "  ^");
    }

    #[test]
    fn caret_past_end_points_after_text() {
        assert_eq!(caret_line("H2", 2), "  ^");
    }
}
