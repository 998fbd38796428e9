/// Normalizes a message for loose comparison.
///
/// Lowercases, trims surrounding whitespace and drops exactly one trailing
/// period. Internal whitespace is left as is.
pub fn canonicalize(raw: &str) -> String {
    let folded = raw.trim().to_lowercase();
    match folded.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => folded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(canonicalize("  JSON_Encode() Is Discouraged.  "), "json_encode() is discouraged");
        assert_eq!(canonicalize("already clean"), "already clean");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_only_one_period_stripped() {
        assert_eq!(canonicalize("wait..."), "wait..");
        assert_eq!(canonicalize("."), "");
    }

    #[test]
    fn test_internal_whitespace_kept() {
        assert_eq!(canonicalize("a  b\tc"), "a  b\tc");
    }

    #[test]
    fn test_period_before_trailing_space() {
        // trim happens first, so the period is still the last char
        assert_eq!(canonicalize("Use esc_html(). \n"), "use esc_html()");
    }
}
