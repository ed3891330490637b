//! Utility functions

/// Slugify a display name for use in a URL path segment.
///
/// Folds Turkish characters to their ASCII counterparts before lowercasing,
/// then collapses every non-alphanumeric run into a single dash.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .chars()
        .map(|c| match c {
            'ı' | 'İ' => 'i',
            'ğ' | 'Ğ' => 'g',
            'ü' | 'Ü' => 'u',
            'ş' | 'Ş' => 's',
            'ö' | 'Ö' => 'o',
            'ç' | 'Ç' => 'c',
            _ => c,
        })
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut last_dash = true;
    for c in folded.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_turkish_characters() {
        assert_eq!(slugify("Elektronik Güncel"), "elektronik-guncel");
        assert_eq!(slugify("Yazılım"), "yazilim");
        assert_eq!(slugify("Çok Satanlar"), "cok-satanlar");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Konsol -- Ürünleri  "), "konsol-urunleri");
        assert_eq!(slugify("A/B Test"), "a-b-test");
    }
}
