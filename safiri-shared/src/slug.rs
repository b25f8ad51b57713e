/// URL-safe slug from a display name: lowercase alphanumeric runs joined
/// by single hyphens, no leading or trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
