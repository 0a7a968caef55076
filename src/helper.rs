use log::trace;

// Helper method for parsing tags, duplicates are dropped keeping first occurrence
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::new();
    if let Some(t) = tags {
        for tag in t.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !parsed.iter().any(|p| p == tag) {
                parsed.push(tag.to_string());
            }
        }
    }
    trace!("Parsed tags: {:?}", parsed);
    parsed
}

/// Escapes text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Truncates to at most `max_chars` characters, appending `...`
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}
