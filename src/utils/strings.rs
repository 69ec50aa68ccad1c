pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Joins paragraphs the way they are laid out in a document: separated by one empty line.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n\n")
}
