// src/core/sanitize.rs

/// Turn a report's display name into a filename stem.
/// Whitespace runs become a single `_`, characters Windows refuses in file
/// names become `_`, everything else (CJK included) is kept as-is.
pub fn normalize_task_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            if !last_us { out.push('_'); last_us = true; }
        } else if is_reserved(ch) {
            out.push('_');
            last_us = true;
        } else {
            out.push(ch);
            last_us = false;
        }
    }
    if out.is_empty() { s!("report") } else { out }
}

fn is_reserved(ch: char) -> bool {
    matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control()
}
