use crate::error::RefError;

/// Characters forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '~', '^', ':', '?', '*', '[', '\\'];

/// Validate a branch name.
///
/// Branch names may be hierarchical (`feature/parser`), so `/` is allowed
/// as a separator but not at either end, doubled, or framing an empty or
/// dot-leading component. The rules are a subset of
/// `git-check-ref-format(1)`, enough to keep names unambiguous as file
/// paths under `refs/heads/`.
pub fn validate_branch_name(name: &str) -> Result<(), RefError> {
    if name.is_empty() {
        return Err(RefError::InvalidBranchName("name is empty".into()));
    }

    if name == "@" {
        return Err(RefError::InvalidBranchName(
            "'@' is not a valid branch name".into(),
        ));
    }

    if name.contains("..") {
        return Err(RefError::InvalidBranchName(format!(
            "'{name}': contains '..'"
        )));
    }

    if name.contains("@{") {
        return Err(RefError::InvalidBranchName(format!(
            "'{name}': contains '@{{'"
        )));
    }

    for c in name.chars() {
        if c.is_ascii_control() || FORBIDDEN_CHARS.contains(&c) {
            return Err(RefError::InvalidBranchName(format!(
                "'{name}': contains forbidden character {c:?}"
            )));
        }
    }

    if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
        return Err(RefError::InvalidBranchName(format!(
            "'{name}': bad '/' placement"
        )));
    }

    for component in name.split('/') {
        if component.starts_with('.') {
            return Err(RefError::InvalidBranchName(format!(
                "'{name}': component starts with '.'"
            )));
        }
        if component.ends_with(".lock") {
            return Err(RefError::InvalidBranchName(format!(
                "'{name}': component ends with '.lock'"
            )));
        }
    }

    if name.ends_with('.') {
        return Err(RefError::InvalidBranchName(format!(
            "'{name}': ends with '.'"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(name: &str) -> bool {
        validate_branch_name(name).is_ok()
    }

    #[test]
    fn accepts_common_names() {
        assert!(ok("main"));
        assert!(ok("feature/parser"));
        assert!(ok("release-1.2"));
        assert!(ok("a/b/c"));
        assert!(ok("UPPER_case"));
    }

    #[test]
    fn rejects_empty_and_at() {
        assert!(!ok(""));
        assert!(!ok("@"));
    }

    #[test]
    fn rejects_double_dot_and_reflog_syntax() {
        assert!(!ok("a..b"));
        assert!(!ok("a@{1}"));
    }

    #[test]
    fn rejects_forbidden_characters() {
        assert!(!ok("with space"));
        assert!(!ok("tilde~1"));
        assert!(!ok("caret^"));
        assert!(!ok("colon:"));
        assert!(!ok("glob*"));
        assert!(!ok("back\\slash"));
        assert!(!ok("ctrl\x07bell"));
    }

    #[test]
    fn rejects_bad_slash_placement() {
        assert!(!ok("/lead"));
        assert!(!ok("trail/"));
        assert!(!ok("a//b"));
    }

    #[test]
    fn rejects_dot_components_and_lock_suffix() {
        assert!(!ok(".hidden"));
        assert!(!ok("a/.b"));
        assert!(!ok("main.lock"));
        assert!(!ok("a/b.lock"));
        assert!(!ok("trailing."));
    }
}
