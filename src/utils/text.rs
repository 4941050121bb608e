/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`-th character of `s`, or `s.len()` past the end.
pub fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(offset, _)| offset)
}

/// The first `n` characters of `s`.
pub fn prefix(s: &str, n: usize) -> &str {
    &s[..byte_offset(s, n)]
}
