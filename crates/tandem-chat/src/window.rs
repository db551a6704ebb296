//! History windowing for outbound payloads
//!
//! Stored conversations are never mutated here; windowing only shapes what
//! gets sent. Two steps: truncate to the most recent `max` entries, then
//! collapse each run of consecutive same-role entries down to its last
//! entry. Some providers reject payloads that do not strictly alternate
//! user/assistant turns; dropping the earlier entries of a run is a lossy
//! but deterministic repair for that constraint.

use crate::chat::Message;

/// Build the outbound message window from stored history.
///
/// Guarantees: output is never longer than `max`, never empty when the
/// input is non-empty, and preserves the relative order of kept entries.
pub fn window_history(messages: &[Message], max: usize) -> Vec<Message> {
    let start = messages.len().saturating_sub(max);
    let tail = &messages[start..];

    tail.iter()
        .enumerate()
        .filter(|(i, msg)| {
            // Keep an entry only if it ends its same-role run
            tail.get(i + 1).is_none_or(|next| next.role != msg.role)
        })
        .map(|(_, msg)| msg.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_empty_history() {
        assert!(window_history(&[], 99).is_empty());
    }

    #[test]
    fn test_alternating_history_kept_as_is() {
        let history = vec![
            Message::user("q1"),
            Message::assistant("a1"),
            Message::user("q2"),
        ];
        assert_eq!(window_history(&history, 99), history);
    }

    #[test]
    fn test_truncates_to_most_recent() {
        let mut history = Vec::new();
        for i in 0..200 {
            let msg = if i % 2 == 0 {
                Message::user(format!("q{i}"))
            } else {
                Message::assistant(format!("a{i}"))
            };
            history.push(msg);
        }

        let window = window_history(&history, 99);
        assert_eq!(window.len(), 99);
        assert_eq!(window[0].content, "q101");
        assert_eq!(window[98].content, "a199");
    }

    #[test]
    fn test_collapses_same_role_runs_to_last() {
        let history = vec![
            Message::user("first try"),
            Message::user("second try"),
            Message::user("third try"),
            Message::assistant("reply"),
            Message::user("followup"),
        ];

        let window = window_history(&history, 99);
        let contents: Vec<_> = window.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["third try", "reply", "followup"]);
    }

    #[test]
    fn test_run_at_end_keeps_last_entry() {
        let history = vec![Message::user("a"), Message::user("b")];
        let window = window_history(&history, 99);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].content, "b");
        assert_eq!(window[0].role, Role::User);
    }

    #[test]
    fn test_never_longer_than_max() {
        let history: Vec<_> = (0..50).map(|i| Message::user(format!("m{i}"))).collect();
        for max in 1..10 {
            assert!(window_history(&history, max).len() <= max);
        }
    }

    #[test]
    fn test_nonempty_input_gives_nonempty_output() {
        let history = vec![Message::assistant("only")];
        assert_eq!(window_history(&history, 1).len(), 1);
    }
}
