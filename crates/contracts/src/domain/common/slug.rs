/// Build a URL slug from free text: lowercase, keep word characters,
/// collapse whitespace and repeated dashes.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut last_dash = true;
    for ch in lowered.chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slug() {
        assert_eq!(slugify("AMD Ryzen 7 5800X"), "amd-ryzen-7-5800x");
    }

    #[test]
    fn collapses_separators_and_symbols() {
        assert_eq!(slugify("  NZXT   H510 (White) "), "nzxt-h510-white");
        assert_eq!(slugify("Core i7-12700K"), "core-i7-12700k");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slugify(""), "");
    }
}
