//! Action trait for state mutations that can be logged

use std::fmt::Debug;

/// Marker trait for actions dispatched to the dashboard store
///
/// Actions are cloned into the log middleware and sent across tasks, hence
/// the `Clone + Send + 'static` bounds.
pub trait Action: Clone + Debug + Send + 'static {
    /// Action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Concise description of an action for logs
///
/// Data-heavy actions (a full weather snapshot, a long provider error body)
/// override this to keep log lines short.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate_for_log(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    format!("{}...", text.chars().take(keep).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 40), "short");
        assert_eq!(truncate_for_log("abcdefghij", 8), "abcde...");
    }
}
