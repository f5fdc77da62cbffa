/// Line counts for a piece of source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    /// Newline-delimited lines, blank ones included.
    pub physical: u64,
    /// Lines with at least one non-whitespace character.
    pub source: u64,
}

pub fn count_lines(text: &str) -> LineCounts {
    let mut counts = LineCounts::default();
    for line in text.lines() {
        counts.physical += 1;
        if !line.trim().is_empty() {
            counts.source += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        assert_eq!(count_lines(""), LineCounts::default());
    }

    #[test]
    fn blank_lines_only_count_physically() {
        let counts = count_lines("a = 1\n\n   \n\tb = 2\n");
        assert_eq!(counts.physical, 4);
        assert_eq!(counts.source, 2);
    }

    #[test]
    fn missing_trailing_newline_still_counts() {
        assert_eq!(count_lines("x\ny").physical, 2);
    }

    #[test]
    fn crlf_line_endings() {
        let counts = count_lines("a\r\n\r\nb\r\n");
        assert_eq!(counts.physical, 3);
        assert_eq!(counts.source, 2);
    }
}
