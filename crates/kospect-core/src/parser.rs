use kospect_types::LogEntry;

/// A line shorter than this can never carry a timestamp prefix.
const TIMESTAMP_MIN_LEN: usize = 30;

/// Splits raw container log text into structured entries.
pub struct LogLineParser;

impl LogLineParser {
    /// Parse the full text of one container's log.
    ///
    /// Lines that are blank after trimming are dropped, including the
    /// trailing blank produced by a terminal newline. Line order is
    /// preserved.
    pub fn parse(container: &str, text: &str) -> Vec<LogEntry> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Self::split_line(container, line))
            .collect()
    }

    /// Split one line into (timestamp, message) when it starts with an
    /// ISO-8601-looking date-time followed by a single space; otherwise the
    /// whole line is the message.
    fn split_line(container: &str, line: &str) -> LogEntry {
        if Self::has_timestamp_prefix(line) {
            if let Some((timestamp, message)) = line.split_once(' ') {
                return LogEntry::new(
                    container.to_string(),
                    Some(timestamp.to_string()),
                    message.to_string(),
                );
            }
        }
        LogEntry::new(container.to_string(), None, line.to_string())
    }

    /// Structural detection: long enough, with '-', '-', 'T' at the byte
    /// positions a date-time prefix puts them.
    fn has_timestamp_prefix(line: &str) -> bool {
        let bytes = line.as_bytes();
        bytes.len() > TIMESTAMP_MIN_LEN
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes[10] == b'T'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_line_splits() {
        let entries = LogLineParser::parse("app", "2024-01-02T10:00:00Z starting worker process\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp.as_deref(), Some("2024-01-02T10:00:00Z"));
        assert_eq!(entries[0].message, "starting worker process");
    }

    #[test]
    fn test_short_line_is_message_only() {
        let entries = LogLineParser::parse("app", "hello");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, None);
        assert_eq!(entries[0].message, "hello");
    }

    #[test]
    fn test_long_line_without_prefix_is_message_only() {
        let line = "plain text that is well over thirty characters long";
        let entries = LogLineParser::parse("app", line);
        assert_eq!(entries[0].timestamp, None);
        assert_eq!(entries[0].message, line);
    }

    #[test]
    fn test_length_threshold_is_strict() {
        // exactly 30 bytes with a valid-looking prefix: not split
        let line = "2024-01-02T10:00:00Z 123456789";
        assert_eq!(line.len(), 30);
        let entries = LogLineParser::parse("app", line);
        assert_eq!(entries[0].timestamp, None);
        assert_eq!(entries[0].message, line);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let text = "first line of output here\n\n   \nsecond line of output here\n";
        let entries = LogLineParser::parse("app", text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first line of output here");
        assert_eq!(entries[1].message, "second line of output here");
    }

    #[test]
    fn test_trailing_newline_produces_no_entry() {
        let entries = LogLineParser::parse("app", "only line\n");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_line_order_preserved() {
        let text = "2024-01-02T10:00:00Z first message after startup\n2024-01-02T10:00:01Z second message after startup\n";
        let entries = LogLineParser::parse("app", text);
        assert_eq!(entries[0].message, "first message after startup");
        assert_eq!(entries[1].message, "second message after startup");
    }

    #[test]
    fn test_multibyte_lines_do_not_panic() {
        // multi-byte characters at the probe positions must not split
        let entries = LogLineParser::parse("app", "────────────────────────────");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, None);
    }
}
