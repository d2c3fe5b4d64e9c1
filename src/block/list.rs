//! Unordered and ordered lists (§4.C "Unordered list" / "Ordered list" /
//! "List normalisation").

use crate::block::{parse_blocks, slevel, BlockEnv};
use crate::diagnostic::{Diagnostic, ErrorKind, MMarkErr};
use crate::document::{Block, Isp};
use crate::refs::ReferenceTable;
use crate::span::{start_pos, Span};
use nom::character::complete::one_of;

fn bullet_gap(after_bullet: Span) -> Option<Span> {
    match crate::scan::sc1_prime(after_bullet) {
        Ok((rest, _)) => Some(rest),
        Err(_) => {
            // No following space/tab: only acceptable at EOL/EOF (an "empty" bullet line).
            if after_bullet.fragment().is_empty()
                || after_bullet.fragment().starts_with(['\n', '\r'])
            {
                Some(after_bullet)
            } else {
                None
            }
        }
    }
}

/// Recognise `-`, `+`, or `*` followed by the mandatory gap. Returns the
/// bullet character, its column, and the span right after the gap.
fn unordered_bullet(input: Span) -> Option<(char, usize, Span)> {
    let col = input.get_column();
    let (after_bullet, c) = one_of::<_, _, nom::error::Error<Span>>("-+*")(input).ok()?;
    let rest = bullet_gap(after_bullet)?;
    Some((c, col, rest))
}

pub fn peek_unordered_bullet(input: Span) -> bool {
    unordered_bullet(input).is_some()
}

/// Recognise a decimal index followed by `.` or `)` and the mandatory gap.
/// Returns the index, the delimiter, the bullet's column, and the span right
/// after the gap.
fn ordered_bullet(input: Span) -> Option<(u64, char, usize, Span)> {
    let col = input.get_column();
    let digits: String = input
        .fragment()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() || digits.len() > 10 {
        return None;
    }
    let after_digits = &input.fragment()[digits.len()..];
    let delim = after_digits.chars().next()?;
    if delim != '.' && delim != ')' {
        return None;
    }
    let byte_off = digits.len() + delim.len_utf8();
    let (after_bullet, _) =
        nom::bytes::complete::take::<_, _, nom::error::Error<Span>>(byte_off)(input).ok()?;
    let rest = bullet_gap(after_bullet)?;
    let index: u64 = digits.parse().ok()?;
    Some((index, delim, col, rest))
}

pub fn peek_ordered_bullet(input: Span) -> bool {
    ordered_bullet(input).is_some()
}

pub fn unordered_list<'a>(
    input: Span<'a>,
    env: BlockEnv,
    defs: &mut ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> Option<(Span<'a>, Block<Isp>)> {
    let (bullet_char, col, first_gap) = unordered_bullet(input)?;
    let mut items = Vec::new();
    let (mut rest, first_item) = parse_item(first_gap, col, env, defs, diags);
    items.push(first_item);

    loop {
        match unordered_bullet(rest) {
            Some((c, item_col, gap)) if c == bullet_char && item_col >= col => {
                let (after, blocks) = parse_item(gap, item_col, env, defs, diags);
                items.push(blocks);
                rest = after;
            }
            _ => break,
        }
    }

    normalize_items(&mut items);
    Some((rest, Block::UnorderedList { items }))
}

pub fn ordered_list<'a>(
    input: Span<'a>,
    env: BlockEnv,
    defs: &mut ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> Option<(Span<'a>, Block<Isp>)> {
    let (start_index, delim, col, first_gap) = ordered_bullet(input)?;
    if start_index >= 1_000_000_000 {
        log::debug!("ordered list start index {start_index} exceeds 10^9-1");
        diags.push(Diagnostic::new(
            start_pos(input),
            ErrorKind::FancyCustom(MMarkErr::ListStartIndexTooBig(start_index as u32)),
        ));
    }

    let mut items = Vec::new();
    let (mut rest, first_item) = parse_item(first_gap, col, env, defs, diags);
    items.push(first_item);

    let mut position: u64 = 1;
    loop {
        let item_start = rest;
        match ordered_bullet(rest) {
            Some((idx, d, item_col, gap)) if d == delim && item_col >= col => {
                let expected = start_index.wrapping_add(position);
                if idx != expected {
                    log::debug!("ordered list index out of order: got {idx}, expected {expected}");
                    diags.push(Diagnostic::new(
                        start_pos(item_start),
                        ErrorKind::FancyCustom(MMarkErr::ListIndexOutOfOrder {
                            actual: idx as u32,
                            expected: expected as u32,
                        }),
                    ));
                }
                let (after, blocks) = parse_item(gap, item_col, env, defs, diags);
                items.push(blocks);
                rest = after;
                position += 1;
            }
            _ => break,
        }
    }

    normalize_items(&mut items);
    Some((
        rest,
        Block::OrderedList {
            start: start_index as u32,
            items,
        },
    ))
}

fn parse_item<'a>(
    after_gap: Span<'a>,
    bullet_col: usize,
    env: BlockEnv,
    defs: &mut ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> (Span<'a>, Vec<Block<Isp>>) {
    let min_level = bullet_col + 2;
    let ind_level = crate::scan::column_of(after_gap);
    let inner_level = slevel(min_level, ind_level);
    let item_env = env.with(true, inner_level);
    let (rest, blocks) = parse_blocks(after_gap, item_env, defs, diags);
    if blocks.is_empty() {
        let pos = start_pos(after_gap);
        return (rest, vec![Block::Naked(Isp::Span(pos, String::new()))]);
    }
    (rest, blocks)
}

/// §4.C "List normalisation": if any item contains a paragraph/heading/
/// quote/code block anywhere (not just after its first block — a blank
/// line before the *first* block of a later item is just as much a
/// looseness signal as one in a later block of the same item), every
/// `Naked` becomes `Paragraph`; otherwise a trailing `Paragraph` in the
/// very last item becomes `Naked`.
fn normalize_items(items: &mut Vec<Vec<Block<Isp>>>) {
    let has_loose_tail = items.iter().any(|item| {
        item.iter().any(|block| {
            matches!(
                block,
                Block::Paragraph(_)
                    | Block::Heading { .. }
                    | Block::Blockquote(_)
                    | Block::CodeBlock { .. }
            )
        })
    });

    let old_items = std::mem::take(items);
    if has_loose_tail {
        *items = old_items
            .into_iter()
            .map(|item| {
                item.into_iter()
                    .map(|block| match block {
                        Block::Naked(t) => Block::Paragraph(t),
                        other => other,
                    })
                    .collect()
            })
            .collect();
        return;
    }

    let last_index = old_items.len().saturating_sub(1);
    *items = old_items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if i != last_index {
                return item;
            }
            let last_idx = item.len().saturating_sub(1);
            item.into_iter()
                .enumerate()
                .map(|(j, block)| {
                    if j == last_idx {
                        if let Block::Paragraph(t) = block {
                            return Block::Naked(t);
                        }
                    }
                    block
                })
                .collect()
        })
        .collect();
}
