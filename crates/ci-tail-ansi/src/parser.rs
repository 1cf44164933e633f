//! Line-level parsing and severity classification

use crate::ansi::parse_ansi_line;
use crate::commands::parse_command;
use crate::types::{ParsedLine, Severity, StyledSegment, WorkflowCommand};

/// Parse one raw log line
///
/// The trailing line terminator (`\n` or `\r\n`) is not part of the
/// displayed text. A carriage return in the middle of a line (progress bars)
/// keeps only what was drawn after the last one.
pub fn parse_line(raw: &str) -> ParsedLine {
    let trimmed = raw.trim_end_matches(['\n', '\r']);
    let visible = trimmed.rsplit('\r').next().unwrap_or(trimmed);

    let segments = parse_ansi_line(visible);

    let plain_text: String = segments.iter().map(|seg| seg.text.as_str()).collect();
    let command = parse_command(&plain_text);
    let severity = classify(&segments, command.as_ref());

    ParsedLine {
        segments,
        command,
        severity,
    }
}

/// Decide how notable a line is
///
/// Failure wins over success when a line mixes both colours.
pub fn classify(segments: &[StyledSegment], command: Option<&WorkflowCommand>) -> Severity {
    if matches!(command, Some(WorkflowCommand::Error { .. })) {
        return Severity::Failure;
    }

    let mut severity = Severity::Plain;
    for segment in segments {
        // Whitespace-only runs are often coloured by accident (padding)
        if segment.text.trim().is_empty() {
            continue;
        }
        match segment.style.fg_color {
            Some(color) if color.is_red() => return Severity::Failure,
            Some(color) if color.is_green() => severity = Severity::Success,
            _ => {}
        }
    }
    severity
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_line_is_not_notable() {
        let line = parse_line("Compiling ci-tail v0.1.0\n");
        assert_eq!(line.severity, Severity::Plain);
        assert_eq!(line.plain_text(), "Compiling ci-tail v0.1.0");
        assert!(!line.severity.is_notable());
    }

    #[test]
    fn test_red_line_is_failure() {
        let line = parse_line("test cursor ... \x1b[31mFAILED\x1b[0m\r\n");
        assert_eq!(line.severity, Severity::Failure);
        assert_eq!(line.plain_text(), "test cursor ... FAILED");
    }

    #[test]
    fn test_green_line_is_success() {
        let line = parse_line("test cursor ... \x1b[32mok\x1b[0m\n");
        assert_eq!(line.severity, Severity::Success);
    }

    #[test]
    fn test_failure_wins_over_success() {
        let line = parse_line("\x1b[32m3 passed\x1b[0m, \x1b[31m1 failed\x1b[0m");
        assert_eq!(line.severity, Severity::Failure);
    }

    #[test]
    fn test_truecolor_red_is_failure() {
        let line = parse_line("\x1b[1;38;2;255;0;0merror\x1b[0m: could not compile\n");
        assert_eq!(line.plain_text(), "error: could not compile");
        assert_eq!(line.severity, Severity::Failure);
    }

    #[test]
    fn test_truecolor_grey_is_plain() {
        let line = parse_line("\x1b[38;2;128;128;128mnote\x1b[0m\n");
        assert_eq!(line.severity, Severity::Plain);
    }

    #[test]
    fn test_error_command_is_failure() {
        let line = parse_line("::error file=src/lib.rs,line=3::mismatched types\n");
        assert_eq!(line.severity, Severity::Failure);
        assert!(line.command.is_some());
    }

    #[test]
    fn test_coloured_padding_is_ignored() {
        let line = parse_line("\x1b[41m   \x1b[0m plain");
        assert_eq!(line.severity, Severity::Plain);
    }

    #[test]
    fn test_carriage_return_keeps_last_frame() {
        let line = parse_line("Downloading 10%\rDownloading 100%\n");
        assert_eq!(line.plain_text(), "Downloading 100%");
    }
}
