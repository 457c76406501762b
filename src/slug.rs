/// Derive a URL-safe slug from arbitrary text.
///
/// Lowercases the input, keeps alphanumerics, and collapses every other run
/// of characters into a single `-`. Returns `"untitled"` when nothing usable
/// remains.
///
/// # Examples
///
/// ```
/// use masthead::slug::slugify;
///
/// assert_eq!(slugify("Welcome to the Rapina Blog"), "welcome-to-the-rapina-blog");
/// assert_eq!(slugify("2026-02-10_notes"), "2026-02-10-notes");
/// assert_eq!(slugify("???"), "untitled");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }
    slug
}
