//! ATX heading (§4.C "ATX heading").

use crate::document::{Block, Isp};
use crate::span::{start_pos, Span};
use nom::bytes::complete::{take_till, take_while_m_n};
use nom::character::complete::one_of;

/// 1-6 `#`, mandatory space-or-tab, content up to an optional trailing
/// `space+ #+` run, then EOL/EOF.
pub fn atx_heading(input: Span) -> Option<(Span, Block<Isp>)> {
    let (after_hashes, hashes): (Span, Span) =
        take_while_m_n::<_, _, nom::error::Error<Span>>(1, 6, |c| c == '#')(input).ok()?;
    // A 7th `#` disqualifies the whole line as an ATX heading.
    if after_hashes.fragment().starts_with('#') {
        return None;
    }
    let level = hashes.fragment().len() as u8;

    let (after_gap, _) = one_of::<_, _, nom::error::Error<Span>>(" \t")(after_hashes).ok()?;

    let (after_line, raw_line): (Span, Span) =
        take_till::<_, _, nom::error::Error<Span>>(|c| c == '\n' || c == '\r')(after_gap).ok()?;
    let (rest, _) = crate::scan::eol_prime(after_line).ok()?;

    let content_pos = start_pos(after_gap);
    let stripped = strip_closing_sequence(raw_line.fragment());
    let trimmed = stripped.trim();

    let content = Isp::Span(content_pos, trimmed.to_string());
    Some((rest, Block::Heading { level, content }))
}

/// Strip a trailing ` #+ ` (or tab-separated) closing sequence, if present.
fn strip_closing_sequence(line: &str) -> &str {
    let trimmed_end = line.trim_end_matches([' ', '\t']);
    let hash_start = trimmed_end
        .char_indices()
        .rev()
        .take_while(|(_, c)| *c == '#')
        .last()
        .map(|(i, _)| i);
    let Some(hash_start) = hash_start else {
        return line;
    };
    if hash_start == 0 {
        // The whole trimmed line is hashes: e.g. "### ###" with empty content.
        return &trimmed_end[0..0];
    }
    let before_hashes = &trimmed_end[..hash_start];
    if let Some(stripped) = before_hashes.strip_suffix([' ', '\t']) {
        stripped
    } else if before_hashes.ends_with(|c: char| c == ' ' || c == '\t') {
        before_hashes
    } else {
        // No whitespace before the hash run: not a closing sequence, keep as-is.
        line
    }
}
