/// Join page texts in document order.
///
/// Every page contributes its text followed by exactly one `\n`, so an empty
/// page shows up as a bare newline instead of disappearing.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let capacity = pages.iter().map(|p| p.as_ref().len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// Expand typographic ligatures (ﬁ → fi, ﬂ → fl, etc.).
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}
