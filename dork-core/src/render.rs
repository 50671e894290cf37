pub const DEFAULT_PLACEHOLDER: &str = "{DOMAIN}";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Substitute every `placeholder` in `query` with `target`, verbatim.
///
/// No escaping and no validation of `target`; an empty target simply erases
/// the placeholders. Encoding for a URL belongs to [`search_url`].
pub fn render_with(query: &str, placeholder: &str, target: &str) -> String {
    if placeholder.is_empty() {
        return query.to_string();
    }
    query.replace(placeholder, target)
}

/// [`render_with`] using the `{DOMAIN}` placeholder.
pub fn render(query: &str, target: &str) -> String {
    render_with(query, DEFAULT_PLACEHOLDER, target)
}

/// One rendered string per target, in target order.
pub fn render_all<S: AsRef<str>>(query: &str, placeholder: &str, targets: &[S]) -> Vec<String> {
    targets
        .iter()
        .map(|t| render_with(query, placeholder, t.as_ref()))
        .collect()
}

/// Search request for an already rendered query.
pub fn search_url(base: &str, rendered: &str) -> String {
    format!("{base}{}", urlencoding::encode(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        assert_eq!(
            render("site:{DOMAIN} inurl:wp-config.php", "example.com"),
            "site:example.com inurl:wp-config.php"
        );
        assert_eq!(
            render("site:{DOMAIN} | site:*.{DOMAIN}", "a.io"),
            "site:a.io | site:*.a.io"
        );
    }

    #[test]
    fn test_render_without_placeholder_is_unchanged() {
        let q = "intitle:\"index of\" ext:sql";
        assert_eq!(render(q, "example.com"), q);
    }

    #[test]
    fn test_render_empty_target() {
        assert_eq!(render("site:{DOMAIN} ext:env", ""), "site: ext:env");
    }

    #[test]
    fn test_render_target_is_verbatim() {
        assert_eq!(render("site:{DOMAIN}", "a b&c"), "site:a b&c");
    }

    #[test]
    fn test_rerender_is_noop() {
        let once = render("site:{DOMAIN} inurl:{DOMAIN}/admin", "example.com");
        assert_eq!(render(&once, "other.org"), once);
    }

    #[test]
    fn test_custom_placeholder() {
        assert_eq!(render_with("site:<T>", "<T>", "x.dev"), "site:x.dev");
        assert_eq!(render_with("site:<T>", "", "x.dev"), "site:<T>");
    }

    #[test]
    fn test_render_all_keeps_target_order() {
        let out = render_all("site:{DOMAIN}", DEFAULT_PLACEHOLDER, &["b.com", "a.com"]);
        assert_eq!(out, vec!["site:b.com", "site:a.com"]);
        assert!(render_all::<&str>("site:{DOMAIN}", DEFAULT_PLACEHOLDER, &[]).is_empty());
    }

    #[test]
    fn test_search_url_encodes() {
        assert_eq!(
            search_url(DEFAULT_SEARCH_URL, "site:a.com ext:env \"DB\""),
            "https://www.google.com/search?q=site%3Aa.com%20ext%3Aenv%20%22DB%22"
        );
    }
}
