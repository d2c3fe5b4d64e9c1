//! Block-level grammar and dispatch (§4.B, §4.C).
//!
//! Mirrors the teacher's `grammar/blocks` + `parser/blocks` split, but
//! collapsed one level: each submodule both recognises its construct (the
//! "grammar" half) and builds the `Block<Isp>` for it (the "parser" half),
//! since here the two always travel together and the extra indirection
//! bought nothing.

mod code;
mod heading;
mod list;
mod paragraph;
mod quote;
mod refdef;
mod thematic;

use crate::diagnostic::Diagnostic;
use crate::document::{Block, Isp};
use crate::refs::ReferenceTable;
use crate::scan::sc;
use crate::span::Span;

/// The scoped environment every block-parsing call threads through (§4.B).
/// `Copy` because every `subEnv` call is "clone, tweak two fields, parse,
/// then let the clone drop" — nothing here needs shared mutation except the
/// reference table, which travels separately.
#[derive(Debug, Clone, Copy)]
pub struct BlockEnv {
    pub ref_level: usize,
    pub allow_naked: bool,
    pub tab_width: usize,
}

impl BlockEnv {
    pub fn top_level() -> Self {
        Self {
            ref_level: 1,
            allow_naked: false,
            tab_width: 4,
        }
    }

    /// `subEnv`: run `f` with `allow_naked` and `ref_level` replaced; the
    /// caller's own fields are untouched since `self` is a value, not a
    /// reference.
    pub fn with(&self, allow_naked: bool, ref_level: usize) -> Self {
        Self {
            allow_naked,
            ref_level,
            ..*self
        }
    }
}

/// `ilevel(r) = r + 4`: the column at which indented code begins inside
/// reference column `r`.
pub fn ilevel(ref_level: usize) -> usize {
    ref_level + 4
}

/// `slevel`: the reference level handed to a container's inner content.
pub fn slevel(min_level: usize, ind_level: usize) -> usize {
    if ind_level >= ilevel(min_level) {
        min_level
    } else {
        ind_level
    }
}

/// Parse a full sequence of blocks at the current environment, consuming
/// input until EOF or until the current line's indentation drops below
/// `env.ref_level` (ending the enclosing container).
pub fn parse_blocks<'a>(
    mut input: Span<'a>,
    env: BlockEnv,
    defs: &mut ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> (Span<'a>, Vec<Block<Isp>>) {
    let mut blocks = Vec::new();

    loop {
        let (rest, consumed) = sc(input).expect("sc is infallible");
        input = rest;

        if input.fragment().is_empty() {
            break;
        }

        let alevel = crate::scan::line_indent_width(consumed.fragment());
        if alevel < env.ref_level {
            break;
        }

        if alevel >= ilevel(env.ref_level) {
            log::trace!("block: indented code at {alevel}");
            let (rest, block) = code::indented_code_block(input, alevel, env);
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some((rest, block)) = thematic::thematic_break(input) {
            log::trace!("block: thematic break at column {alevel}");
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some((rest, block)) = heading::atx_heading(input) {
            log::trace!("block: atx heading at column {alevel}");
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some((rest, block)) = code::fenced_code_block(input, alevel, env) {
            log::trace!("block: fenced code at column {alevel}");
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some((rest, block)) = list::unordered_list(input, env, defs, diags) {
            log::trace!("block: unordered list at column {alevel}");
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some((rest, block)) = list::ordered_list(input, env, defs, diags) {
            log::trace!("block: ordered list at column {alevel}");
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some((rest, block)) = quote::blockquote(input, alevel, env, defs, diags) {
            log::trace!("block: blockquote at column {alevel}");
            blocks.push(block);
            input = rest;
            continue;
        }

        if let Some(rest) = refdef::reference_definition(input, defs, diags) {
            log::trace!("block: reference definition at column {alevel}");
            input = rest;
            continue;
        }

        let (rest, block) = paragraph::paragraph(input, env);
        blocks.push(block);
        input = rest;
    }

    (input, blocks)
}

/// Does the current line, at a column within `[env.ref_level,
/// ilevel(env.ref_level))`, look like the opening of some *other* block
/// construct? Used by the paragraph parser to decide whether a
/// non-blank line "breaks" it (§4.C "Paragraph").
pub(crate) fn looks_like_block_start(input: Span, env: BlockEnv) -> bool {
    let alevel = crate::scan::column_of(input);
    if alevel < env.ref_level || alevel >= ilevel(env.ref_level) {
        return false;
    }
    thematic::thematic_break(input).is_some()
        || heading::atx_heading(input).is_some()
        || code::peek_fenced_code_block(input)
        || list::peek_unordered_bullet(input)
        || list::peek_ordered_bullet(input)
        || quote::peek_blockquote(input)
        || refdef::peek_reference_definition(input)
}
