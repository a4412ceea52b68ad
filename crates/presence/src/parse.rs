//! Log-line transition extraction.

use std::sync::LazyLock;

use regex::Regex;

static JOIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Player '(.*)' joined the game").unwrap());
static LEAVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Player '(.*)' left the game").unwrap());

/// A single join or leave transition parsed from one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// `Player '<name>' joined the game`
    Join(String),
    /// `Player '<name>' left the game`
    Leave(String),
}

impl LineEvent {
    /// The player name carried by the transition.
    pub fn name(&self) -> &str {
        match self {
            Self::Join(name) | Self::Leave(name) => name,
        }
    }
}

/// Match a log line against the join/leave phrases, join checked first.
///
/// Matching is unanchored and the name capture is greedy: surrounding log
/// text is tolerated, and a quoted name containing `'` survives intact. A
/// line matching neither phrase yields `None`; each line yields at most one
/// transition.
pub fn parse_line(line: &str) -> Option<LineEvent> {
    if let Some(caps) = JOIN_REGEX.captures(line) {
        return Some(LineEvent::Join(caps[1].to_string()));
    }
    if let Some(caps) = LEAVE_REGEX.captures(line) {
        return Some(LineEvent::Leave(caps[1].to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_line_extracts_name() {
        assert_eq!(
            parse_line("Player 'carol' joined the game"),
            Some(LineEvent::Join("carol".to_string()))
        );
    }

    #[test]
    fn test_leave_line_extracts_name() {
        assert_eq!(
            parse_line("Player 'carol' left the game"),
            Some(LineEvent::Leave("carol".to_string()))
        );
    }

    #[test]
    fn test_unrelated_line_is_ignored() {
        assert_eq!(parse_line("System message: server restarting"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_surrounding_text_is_tolerated() {
        assert_eq!(
            parse_line("[12:03:09] INFO Player 'dana' joined the game (slot 3)"),
            Some(LineEvent::Join("dana".to_string()))
        );
    }

    #[test]
    fn test_name_containing_quote_is_captured_whole() {
        assert_eq!(
            parse_line("Player 'it's me' joined the game"),
            Some(LineEvent::Join("it's me".to_string()))
        );
    }

    #[test]
    fn test_join_takes_priority_over_leave() {
        let line = "Player 'a' joined the game right as Player 'b' left the game";
        assert_eq!(parse_line(line), Some(LineEvent::Join("a".to_string())));
    }

    #[test]
    fn test_event_name_accessor() {
        assert_eq!(LineEvent::Join("dana".to_string()).name(), "dana");
        assert_eq!(LineEvent::Leave("erin".to_string()).name(), "erin");
    }
}
