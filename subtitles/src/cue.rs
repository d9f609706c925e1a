//! Cue data: one subtitle interval plus its styled text runs.

/// A span of cue text with uniform styling. Produced by the parser from
/// inline `<b>`, `<i>` and `<font color="#RRGGBB">` markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// RGB, when the source set an explicit color.
    pub color: Option<[u8; 3]>,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            color: None,
        }
    }
}

/// One subtitle entry: inclusive time interval in milliseconds plus styled
/// text. Invariant (enforced by the parser): `start_ms <= end_ms`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    pub start_ms: u32,
    pub end_ms: u32,
    pub runs: Vec<StyledRun>,
}

impl Cue {
    /// Whether `time_ms` falls inside this cue. Both bounds inclusive.
    pub fn contains(&self, time_ms: u32) -> bool {
        self.start_ms <= time_ms && time_ms <= self.end_ms
    }

    /// Cue text with styling stripped, runs concatenated in order.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let cue = Cue {
            start_ms: 1000,
            end_ms: 2000,
            runs: vec![StyledRun::plain("x")],
        };
        assert!(cue.contains(1000));
        assert!(cue.contains(2000));
        assert!(!cue.contains(999));
        assert!(!cue.contains(2001));
    }

    #[test]
    fn plain_text_joins_runs() {
        let cue = Cue {
            start_ms: 0,
            end_ms: 1,
            runs: vec![
                StyledRun::plain("a "),
                StyledRun {
                    text: "b".into(),
                    bold: true,
                    italic: false,
                    color: None,
                },
            ],
        };
        assert_eq!(cue.plain_text(), "a b");
    }
}
