//! Mojibake correction.
//!
//! The defect being reversed: UTF-8 bytes were read as Latin-1, one
//! character per byte, and those characters were stored again as UTF-8.
//! Undoing it means turning each character back into its byte and decoding
//! the bytes as UTF-8.

/// True iff every character is 7-bit ASCII. ASCII text can't carry the defect.
pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

/// Reinterpret each character as one byte (code point 0–255) and decode the
/// result as UTF-8.
///
/// Returns `None` when a code point is above 255 or the bytes are not valid
/// UTF-8; the value must then be left alone.
pub fn reverse_mojibake(s: &str) -> Option<String> {
    let bytes = s
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

/// What to do with one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Empty or whitespace-only text.
    Empty,
    /// SQL NULL.
    Null,
    Ascii,
    /// Doesn't match the corruption pattern.
    Unfixable,
    /// Decodes to itself.
    Unchanged,
    Fixed(String),
}

/// Classify a cell value and compute its correction.
pub fn classify(value: Option<&str>) -> Verdict {
    let Some(value) = value else {
        return Verdict::Null;
    };
    if value.trim().is_empty() {
        return Verdict::Empty;
    }
    if is_ascii(value) {
        return Verdict::Ascii;
    }
    match reverse_mojibake(value) {
        None => Verdict::Unfixable,
        Some(fixed) if fixed == value => Verdict::Unchanged,
        Some(fixed) => Verdict::Fixed(fixed),
    }
}

/// Whether an already-corrected value would decode yet again, which hints
/// at a second layer of mis-encoding that a single pass leaves behind.
pub fn looks_double_encoded(fixed: &str) -> bool {
    !is_ascii(fixed) && reverse_mojibake(fixed).is_some_and(|again| again != fixed)
}

/// At most `max` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KHMER_FRUIT: &str = "ផ្លែឈើ";

    /// Produce the corrupted form: every UTF-8 byte becomes one character.
    fn garble(s: &str) -> String {
        s.bytes().map(char::from).collect()
    }

    #[test]
    fn ascii_detection() {
        assert!(is_ascii("Electronics"));
        assert!(is_ascii(""));
        assert!(!is_ascii("café"));
        assert!(!is_ascii(KHMER_FRUIT));
    }

    #[test]
    fn ascii_reverses_to_itself() {
        assert_eq!(reverse_mojibake("Fresh fruit, 1kg").as_deref(), Some("Fresh fruit, 1kg"));
    }

    #[test]
    fn khmer_round_trip() {
        let corrupted = garble(KHMER_FRUIT);
        assert_ne!(corrupted, KHMER_FRUIT);
        assert_eq!(reverse_mojibake(&corrupted).as_deref(), Some(KHMER_FRUIT));
    }

    #[test]
    fn mixed_text_round_trip() {
        let original = "Mango ស្វាយ · 2 pcs";
        assert_eq!(reverse_mojibake(&garble(original)).as_deref(), Some(original));
    }

    #[test]
    fn code_points_above_255_have_no_fix() {
        assert_eq!(reverse_mojibake(KHMER_FRUIT), None);
        assert_eq!(reverse_mojibake("price €5"), None);
    }

    #[test]
    fn invalid_utf8_has_no_fix() {
        // 0xE9 alone is not a valid UTF-8 sequence
        assert_eq!(reverse_mojibake("café"), None);
    }

    #[test]
    fn classify_covers_every_branch() {
        assert_eq!(classify(None), Verdict::Null);
        assert_eq!(classify(Some("")), Verdict::Empty);
        assert_eq!(classify(Some("  ")), Verdict::Empty);
        assert_eq!(classify(Some("Electronics")), Verdict::Ascii);
        assert_eq!(classify(Some("café")), Verdict::Unfixable);
        assert_eq!(
            classify(Some(&garble(KHMER_FRUIT))),
            Verdict::Fixed(KHMER_FRUIT.to_string())
        );
    }

    #[test]
    fn second_pass_never_fixes_again() {
        let Verdict::Fixed(first) = classify(Some(&garble(KHMER_FRUIT))) else {
            panic!("expected a fix on the first pass");
        };
        assert!(!matches!(classify(Some(&first)), Verdict::Fixed(_)));
    }

    #[test]
    fn double_encoding_is_flagged() {
        let twice = garble(&garble(KHMER_FRUIT));
        let once = reverse_mojibake(&twice).unwrap();
        assert_eq!(once, garble(KHMER_FRUIT));
        assert!(looks_double_encoded(&once));
        assert!(!looks_double_encoded(KHMER_FRUIT));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars(KHMER_FRUIT, 2).chars().count(), 2);
    }
}
