//! Number and label rendering.

/// Render a number the way the modeling language reads it back.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "na".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }

    let mut rendered = format!("{value:.12}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    if rendered == "-0" {
        "0".to_string()
    } else {
        rendered
    }
}

/// Quote a set element unless it is a plain identifier-like token.
pub fn quote_label(label: &str) -> String {
    let plain = !label.is_empty()
        && label
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if plain {
        label.to_string()
    } else {
        quote_element(label)
    }
}

/// Quote a set element for use inside an assignment, where bare tokens name sets.
pub fn quote_element(label: &str) -> String {
    if label.contains('\'') {
        format!("\"{label}\"")
    } else {
        format!("'{label}'")
    }
}

/// Comma separated list, parenthesized when non-empty.
pub fn index_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let joined: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    format!("({})", joined.join(","))
}
