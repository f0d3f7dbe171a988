/// Split text on `\r?\n`, trimming each line and dropping blank ones.
///
/// Used for line accounting, where indentation and blank separators
/// should not inflate counts.
pub fn split_lines_trimmed(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Count non-blank lines in a block of text.
pub fn count_nonblank_lines(text: &str) -> usize {
    split_lines_trimmed(text).len()
}
