//! SRT parsing: blocks of `{index, "start --> end", text lines...}` separated
//! by blank lines. A malformed block is skipped and recorded; one bad cue
//! never fails the whole track.

use std::fmt;

use crate::cue::{Cue, StyledRun};

/// One skipped cue: the source line the block started on plus the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number of the block's index line.
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Convert `"HH:MM:SS,mmm"` to integer milliseconds.
pub fn parse_timestamp(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let (clock, millis) = s
        .split_once(',')
        .ok_or_else(|| format!("bad timestamp {s:?}: missing ','"))?;
    let mut parts = clock.split(':');
    let mut field = |name: &str| -> Result<u32, String> {
        parts
            .next()
            .ok_or_else(|| format!("bad timestamp {s:?}: missing {name}"))?
            .parse::<u32>()
            .map_err(|_| format!("bad timestamp {s:?}: non-numeric {name}"))
    };
    let hours = field("hours")?;
    let minutes = field("minutes")?;
    let seconds = field("seconds")?;
    if parts.next().is_some() {
        return Err(format!("bad timestamp {s:?}: too many ':' fields"));
    }
    let millis = millis
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("bad timestamp {s:?}: non-numeric milliseconds"))?;
    Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
}

/// Format milliseconds as truncating `MM:SS` with unbounded, zero-padded
/// minutes (so an hour-long position reads `62:03`, not `1:02:03`).
pub fn format_mm_ss(ms: u32) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parse a whole SRT document. Returns the cues that parsed cleanly, in
/// source order, plus one `ParseError` per skipped block.
pub fn parse_srt(input: &str) -> (Vec<Cue>, Vec<ParseError>) {
    let mut cues = Vec::new();
    let mut errors = Vec::new();

    // Strip a UTF-8 BOM so the first index line parses.
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let lines: Vec<&str> = input.lines().map(|l| l.trim_end_matches('\r')).collect();

    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }
        let block_line = i + 1;
        match parse_block(&lines, &mut i) {
            Ok(cue) => cues.push(cue),
            Err(reason) => {
                log::warn!("skipping subtitle cue at line {block_line}: {reason}");
                errors.push(ParseError {
                    line: block_line,
                    reason,
                });
                // Resynchronize at the next blank line.
                while i < lines.len() && !lines[i].trim().is_empty() {
                    i += 1;
                }
            }
        }
    }
    (cues, errors)
}

/// Parse one block starting at `lines[*i]` (known non-blank). Advances `*i`
/// past the block's text lines on success; on failure the caller resyncs.
fn parse_block(lines: &[&str], i: &mut usize) -> Result<Cue, String> {
    lines[*i]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("bad cue index {:?}", lines[*i].trim()))?;
    *i += 1;

    let time_line = lines
        .get(*i)
        .ok_or("missing timestamp line")?;
    let (start_s, end_s) = time_line
        .split_once("-->")
        .ok_or_else(|| format!("bad timestamp line {:?}: missing '-->'", time_line.trim()))?;
    let start_ms = parse_timestamp(start_s)?;
    let end_ms = parse_timestamp(end_s)?;
    if start_ms > end_ms {
        return Err(format!("cue ends before it starts ({start_ms} > {end_ms})"));
    }
    *i += 1;

    let mut text = String::new();
    while *i < lines.len() && !lines[*i].trim().is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(lines[*i]);
        *i += 1;
    }
    if text.is_empty() {
        return Err("cue has no text".to_string());
    }

    let runs = parse_styled(&text)?;
    Ok(Cue {
        start_ms,
        end_ms,
        runs,
    })
}

/// Convert cue text with inline `<b>`, `<i>` and `<font color="#RRGGBB">`
/// markup into styled runs. Tags must nest and close; anything else is a
/// malformed cue.
fn parse_styled(text: &str) -> Result<Vec<StyledRun>, String> {
    let mut runs = Vec::new();
    let mut buf = String::new();
    let mut bold = 0u32;
    let mut italic = 0u32;
    let mut colors: Vec<[u8; 3]> = Vec::new();

    let mut flush = |buf: &mut String, bold: u32, italic: u32, colors: &[[u8; 3]]| {
        if !buf.is_empty() {
            runs.push(StyledRun {
                text: std::mem::take(buf),
                bold: bold > 0,
                italic: italic > 0,
                color: colors.last().copied(),
            });
        }
    };

    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let (before, tagged) = rest.split_at(open);
        buf.push_str(before);
        let close = tagged
            .find('>')
            .ok_or_else(|| "unterminated '<' in cue text".to_string())?;
        let tag = &tagged[1..close];
        flush(&mut buf, bold, italic, &colors);
        match tag {
            "b" => bold += 1,
            "i" => italic += 1,
            "/b" => bold = bold.checked_sub(1).ok_or("'</b>' without '<b>'")?,
            "/i" => italic = italic.checked_sub(1).ok_or("'</i>' without '<i>'")?,
            "/font" => {
                colors.pop().ok_or("'</font>' without '<font>'")?;
            }
            t if t.starts_with("font") => colors.push(parse_font_color(t)?),
            t => return Err(format!("unsupported tag <{t}>")),
        }
        rest = &tagged[close + 1..];
    }
    buf.push_str(rest);
    flush(&mut buf, bold, italic, &colors);

    if bold > 0 || italic > 0 || !colors.is_empty() {
        return Err("unclosed style tag in cue text".to_string());
    }
    if runs.is_empty() {
        return Err("cue text is empty after markup".to_string());
    }
    Ok(runs)
}

/// Extract RGB from a `font color="#RRGGBB"` tag body.
fn parse_font_color(tag: &str) -> Result<[u8; 3], String> {
    let hash = tag
        .find('#')
        .ok_or_else(|| format!("<{tag}>: missing '#RRGGBB' color"))?;
    let hex = tag[hash + 1..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect::<String>();
    if hex.len() != 6 {
        return Err(format!("<{tag}>: color must be 6 hex digits"));
    }
    let channel = |r: std::ops::Range<usize>| u8::from_str_radix(&hex[r], 16).unwrap();
    Ok([channel(0..2), channel(2..4), channel(4..6)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trip() {
        assert_eq!(parse_timestamp("01:02:03,456").unwrap(), 3_723_456);
        assert_eq!(format_mm_ss(3_723_456), "62:03");
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!(parse_timestamp("01:02:03.456").is_err());
        assert!(parse_timestamp("01:02,456").is_err());
        assert!(parse_timestamp("aa:bb:cc,ddd").is_err());
    }

    #[test]
    fn format_pads_and_truncates() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(59_999), "00:59");
        assert_eq!(format_mm_ss(61_000), "01:01");
    }

    #[test]
    fn parses_two_plain_cues() {
        let src = "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n2\n00:00:01,000 --> 00:00:02,000\nWorld\nAgain\n";
        let (cues, errors) = parse_srt(src);
        assert!(errors.is_empty());
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].plain_text(), "Hello");
        assert_eq!(cues[1].plain_text(), "World\nAgain");
        assert_eq!(cues[1].start_ms, 1000);
        assert_eq!(cues[1].end_ms, 2000);
    }

    #[test]
    fn styled_markup_becomes_runs() {
        let src = "1\n00:00:00,000 --> 00:00:01,000\nplain <b>bold <i>both</i></b> <font color=\"#FF0000\">red</font>\n";
        let (cues, errors) = parse_srt(src);
        assert!(errors.is_empty());
        let runs = &cues[0].runs;
        assert_eq!(runs[0], StyledRun::plain("plain "));
        assert_eq!(runs[1].text, "bold ");
        assert!(runs[1].bold && !runs[1].italic);
        assert_eq!(runs[2].text, "both");
        assert!(runs[2].bold && runs[2].italic);
        let red = runs.last().unwrap();
        assert_eq!(red.text, "red");
        assert_eq!(red.color, Some([0xFF, 0x00, 0x00]));
    }

    #[test]
    fn malformed_block_is_skipped_not_fatal() {
        let src = "1\n00:00:00,000 --> 00:00:01,000\nGood\n\nnot-a-number\n00:00:02,000 --> 00:00:03,000\nBad\n\n3\n00:00:04,000 --> 00:00:05,000\nAlso good\n";
        let (cues, errors) = parse_srt(src);
        assert_eq!(cues.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 5);
        assert_eq!(cues[1].plain_text(), "Also good");
    }

    #[test]
    fn unclosed_tag_drops_the_cue() {
        let src = "1\n00:00:00,000 --> 00:00:01,000\n<b>never closed\n\n2\n00:00:01,000 --> 00:00:02,000\nfine\n";
        let (cues, errors) = parse_srt(src);
        assert_eq!(cues.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(cues[0].plain_text(), "fine");
    }

    #[test]
    fn reversed_interval_is_rejected() {
        let src = "1\n00:00:05,000 --> 00:00:01,000\nbackwards\n";
        let (cues, errors) = parse_srt(src);
        assert!(cues.is_empty());
        assert_eq!(errors.len(), 1);
    }
}
