//! Slug derivation
//!
//! A slug is a lowercase URL segment made of `[a-z0-9-]`.

/// Derive a slug from a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-` and trims hyphens at both ends. Non-ASCII letters count as
/// separators. Idempotent on strings that already are valid slugs.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Non-empty and only `[a-z0-9-]`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Shoes"), "shoes");
        assert_eq!(slugify("Running Shoes"), "running-shoes");
        assert_eq!(slugify("  Men's  T-Shirts & Tops!  "), "men-s-t-shirts-tops");
        assert_eq!(slugify("Size 42"), "size-42");
        assert_eq!(slugify("---Sale---"), "sale");
    }

    #[test]
    fn test_slugify_non_ascii() {
        assert_eq!(slugify("Café Crème"), "caf-cr-me");
        assert_eq!(slugify("鞋子"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["shoes", "running-shoes", "a-1-b-2", "Running Shoes", "Men's Tops"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("shoes"));
        assert!(is_valid_slug("running-shoes-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Shoes"));
        assert!(!is_valid_slug("running shoes"));
        assert!(!is_valid_slug("shoes_and_boots"));
    }
}
