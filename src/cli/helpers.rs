//! Shared helper functions for CLI commands
//!
//! Display formatting used by the preview tables and the interactive wizard.

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output. Widths too narrow
/// for the ellipsis are cut without one.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len < 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First three keywords, with a "(+n)" suffix for the rest
pub fn keywords_preview(keywords: &[String]) -> String {
    let shown = keywords.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if keywords.len() > 3 {
        format!("{} (+{})", shown, keywords.len() - 3)
    } else {
        shown
    }
}

/// First two outline sections, with a "(+n more)" suffix
pub fn outline_preview(outline: &[String]) -> String {
    let shown = outline.iter().take(2).cloned().collect::<Vec<_>>().join(" • ");
    if outline.len() > 2 {
        format!("{} (+{} more)", shown, outline.len() - 2)
    } else {
        shown
    }
}

/// Display label for an architecture category key
///
/// "servicePages" becomes "Service", "homepage" becomes "Homepage".
pub fn category_label(category: &str) -> String {
    let trimmed = category.strip_suffix("Pages").unwrap_or(category);
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// "N of M rows selected"
pub fn selection_summary(selected: usize, visible: usize) -> String {
    format!("{} of {} rows selected", selected, visible)
}
