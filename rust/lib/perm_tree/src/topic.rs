//! MQTT-style topic matching for state subscriptions.
//!
//! - `+` matches exactly one level
//! - `#` matches any number of remaining levels, including none (last segment only)
//!
//! Levels are separated by `/`.

/// Whether `pattern` matches the concrete `topic`.
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');
    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return pat.next().is_none(),
            (Some("+"), Some(_)) => {}
            (Some(p), Some(t)) if p == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}
