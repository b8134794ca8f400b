/// Lowercase ASCII words joined by single dashes. Never empty.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else if ch == '\'' {
            // "O'Brien" -> "obrien"
            continue;
        } else {
            pending_dash = true;
        }
    }
    if out.len() > 80 {
        out.truncate(80);
        while out.ends_with('-') {
            out.pop();
        }
    }
    if out.is_empty() {
        "profile".to_string()
    } else {
        out
    }
}

/// Candidate slugs in probe order: `base`, `base-1`, `base-2`, ...
pub fn candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("Jane Doe"), "jane-doe");
        assert_eq!(slugify("  Smith & Wesson, LLP "), "smith-wesson-llp");
        assert_eq!(slugify("Mary-Jane O'Brien"), "mary-jane-obrien");
        assert_eq!(slugify("***"), "profile");
    }

    #[test]
    fn candidates_suffix_after_first() {
        assert_eq!(candidate("jane-doe", 0), "jane-doe");
        assert_eq!(candidate("jane-doe", 2), "jane-doe-2");
    }
}
