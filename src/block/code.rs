//! Fenced and indented code blocks (§4.C).

use crate::block::{ilevel, BlockEnv};
use crate::document::{Block, Isp};
use crate::span::Span;
use nom::bytes::complete::{take_till, take_while1, take_while_m_n};

fn take_line(input: Span) -> (Span, &str, Span) {
    let (after_line, raw): (Span, Span) =
        take_till::<_, _, nom::error::Error<Span>>(|c| c == '\n' || c == '\r')(input)
            .expect("take_till never fails");
    let (rest, _) = crate::scan::eol_prime(after_line).expect("eol_prime never fails");
    (after_line, raw.fragment(), rest)
}

/// Does `input` open a fence (for the paragraph-break lookahead), without
/// committing to parsing the whole block?
pub fn peek_fenced_code_block(input: Span) -> bool {
    take_while_m_n::<_, _, nom::error::Error<Span>>(3, usize::MAX, |c| c == '`')(input).is_ok()
        || take_while_m_n::<_, _, nom::error::Error<Span>>(3, usize::MAX, |c| c == '~')(input)
            .is_ok()
}

/// `col` is the tab-expanded column (§6) at which the fence opens, as
/// measured by the caller's block dispatch — reused here rather than
/// re-derived, since by this point `input` no longer carries the
/// indentation that produced it.
pub fn fenced_code_block<'a>(
    input: Span<'a>,
    col: usize,
    env: BlockEnv,
) -> Option<(Span<'a>, Block<Isp>)> {
    let fence_char = match input.fragment().chars().next()? {
        c @ ('`' | '~') => c,
        _ => return None,
    };
    let (after_fence, fence): (Span, Span) =
        take_while1::<_, _, nom::error::Error<Span>>(|c| c == fence_char)(input).ok()?;
    if fence.fragment().len() < 3 {
        return None;
    }
    let fence_len = fence.fragment().len();
    let fence_col = col;

    let (after_line, info_raw, mut rest) = take_line(after_fence);
    if fence_char == '`' && info_raw.contains('`') {
        return None;
    }
    let _ = after_line;
    let info = {
        let trimmed = info_raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    let strip_cols = fence_col.saturating_sub(1);
    let mut body = String::new();
    loop {
        if rest.fragment().is_empty() {
            break;
        }
        let line_col = crate::scan::column_of(rest);
        let candidate = rest.fragment();
        let closes = {
            let run_len = candidate.chars().take_while(|c| *c == fence_char).count();
            run_len >= fence_len
                && candidate[run_len..].chars().all(|c| c == ' ' || c == '\t')
                && line_col < ilevel(env.ref_level)
        };
        if closes {
            let (_after_line, _raw, after_close) = take_line(rest);
            rest = after_close;
            break;
        }
        let (_, line_text, after_line) = take_line(rest);
        let stripped = strip_columns(line_text, strip_cols);
        body.push_str(stripped);
        body.push('\n');
        rest = after_line;
    }

    Some((
        rest,
        Block::CodeBlock {
            info,
            body,
        },
    ))
}

/// Strip up to `cols` columns of leading spaces/tabs (tab = 4 cols) from a
/// plain `&str` line, never splitting a tab across the boundary.
fn strip_columns(line: &str, cols: usize) -> &str {
    let mut consumed_cols = 0usize;
    let mut consumed_bytes = 0usize;
    for c in line.chars() {
        if consumed_cols >= cols {
            break;
        }
        match c {
            ' ' => {
                consumed_cols += 1;
                consumed_bytes += c.len_utf8();
            }
            '\t' => {
                let width = 4 - (consumed_cols % 4);
                if consumed_cols + width <= cols {
                    consumed_cols += width;
                    consumed_bytes += c.len_utf8();
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    &line[consumed_bytes..]
}

/// `col` is the tab-expanded column (§6) of `input`'s first line, as
/// measured by the caller's block dispatch — `input` itself no longer
/// carries that indentation to re-derive it from. Every later line in the
/// loop still has its own leading whitespace intact, so those are measured
/// directly off `rest`.
pub fn indented_code_block<'a>(input: Span<'a>, col: usize, env: BlockEnv) -> (Span<'a>, Block<Isp>) {
    let strip_cols = env.ref_level + 3;
    let mut body = String::new();
    let mut rest = input;
    let mut line_col = col;
    loop {
        if rest.fragment().is_empty() {
            break;
        }
        let is_blank = rest
            .fragment()
            .chars()
            .take_while(|c| *c != '\n' && *c != '\r')
            .all(|c| c == ' ' || c == '\t');
        if !is_blank && line_col < ilevel(env.ref_level) {
            break;
        }
        let (_, line_text, after_line) = take_line(rest);
        body.push_str(strip_columns(line_text, strip_cols));
        body.push('\n');
        rest = after_line;
        if rest.fragment().is_empty() {
            break;
        }
        line_col = crate::scan::column_of(rest);
    }
    (rest, Block::CodeBlock { info: None, body })
}
