//! Small string helpers shared by every line recognizer.
//!
//! None of these implement a string-literal grammar. They find markers and
//! quote characters by plain substring search, which is all the declaration
//! idioms need.

/// Removes leading and trailing ASCII whitespace.
pub fn trim_whitespace(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Returns the text between the first quote after `marker` and the next
/// occurrence of that same quote character.
///
/// Either `'` or `"` may open the value; whichever appears first after the
/// marker wins. Escaped quotes are not recognised.
///
/// # Example
///
/// ```
/// use openapi_from_resources::text::extract_quoted;
///
/// assert_eq!(extract_quoted("model_name 'widget'", "model_name"), Some("widget"));
/// assert_eq!(extract_quoted("model_name :widget", "model_name"), None);
/// ```
pub fn extract_quoted<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let after_marker = &text[text.find(marker)? + marker.len()..];
    let open = after_marker.find(['\'', '"'])?;
    let quote = after_marker[open..].chars().next()?;
    let value = &after_marker[open + 1..];
    let close = value.find(quote)?;
    Some(&value[..close])
}

/// Strips one leading quote and, if present, one trailing quote.
///
/// Used for both namespace names and resource names so the two stay
/// consistent.
pub fn strip_quotes(s: &str) -> &str {
    let is_quote = |c: char| c == '\'' || c == '"';
    match s.strip_prefix(is_quote) {
        Some(rest) => rest.strip_suffix(is_quote).unwrap_or(rest),
        None => s,
    }
}

/// Extracts the symbol that follows the first colon on a declaration line.
///
/// The value runs to the first comma (or the end of the line) and is cut at
/// the first whitespace, so `has_many :posts do` yields `posts`. Returns an
/// empty string when the line has no colon.
pub fn symbol_after_colon(line: &str) -> &str {
    let Some(colon) = line.find(':') else {
        return "";
    };
    let rest = &line[colon + 1..];
    let rest = match rest.find(',') {
        Some(comma) => &rest[..comma],
        None => rest,
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    match rest.find(|c: char| c.is_ascii_whitespace()) {
        Some(space) => &rest[..space],
        None => rest,
    }
}

/// Whether `word` appears in `line` as a whole identifier.
pub fn has_word(line: &str, word: &str) -> bool {
    line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token == word)
}

/// Whether `line` looks like a method definition header (`def ...`).
pub fn looks_like_definition(line: &str) -> bool {
    has_word(line, "def")
}
