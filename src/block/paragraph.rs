//! Paragraph accumulation and the naked/paragraph distinction (§4.C
//! "Paragraph").

use crate::block::{looks_like_block_start, BlockEnv};
use crate::document::{Block, Isp};
use crate::span::{start_pos, Span};
use nom::bytes::complete::take_till;

fn is_blank_line(input: Span) -> bool {
    input
        .fragment()
        .chars()
        .take_while(|c| *c != '\n' && *c != '\r')
        .all(|c| c == ' ' || c == '\t')
}

fn take_raw_line(input: Span) -> (Span, &str, Span) {
    let (after_line, raw): (Span, Span) =
        take_till::<_, _, nom::error::Error<Span>>(|c| c == '\n' || c == '\r')(input)
            .expect("take_till never fails");
    let (rest, _) = crate::scan::eol_prime(after_line).expect("eol_prime never fails");
    (after_line, raw.fragment(), rest)
}

pub fn paragraph<'a>(input: Span<'a>, env: BlockEnv) -> (Span<'a>, Block<Isp>) {
    let pos = start_pos(input);
    let mut lines: Vec<&str> = Vec::new();
    let mut rest = input;
    let mut ended_by_blank_or_break = false;

    loop {
        let (_, line_text, after_line) = take_raw_line(rest);
        lines.push(line_text);
        rest = after_line;

        if rest.fragment().is_empty() {
            break;
        }
        if is_blank_line(rest) {
            let (_, _, after_blank) = take_raw_line(rest);
            rest = after_blank;
            ended_by_blank_or_break = true;
            break;
        }
        if looks_like_block_start(rest, env) {
            ended_by_blank_or_break = true;
            break;
        }
    }

    let mut text = lines.join("\n");
    let trimmed_len = text.trim_end_matches([' ', '\t']).len();
    text.truncate(trimmed_len);
    let content = Isp::Span(pos, text);
    if env.allow_naked && !ended_by_blank_or_break {
        (rest, Block::Naked(content))
    } else {
        (rest, Block::Paragraph(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(s: &str) -> Span {
        crate::span::new_span(s, "test.md")
    }

    #[test]
    fn smoke_test_single_line_paragraph_at_eof() {
        let env = BlockEnv::top_level();
        let (rest, block) = paragraph(span("hi"), env);
        assert_eq!(*rest.fragment(), "");
        assert!(matches!(block, Block::Paragraph(Isp::Span(_, ref t)) if t == "hi"));
    }

    #[test]
    fn smoke_test_naked_when_allowed_and_not_broken() {
        let env = BlockEnv::top_level().with(true, 1);
        let (_, block) = paragraph(span("hi"), env);
        assert!(matches!(block, Block::Naked(Isp::Span(_, ref t)) if t == "hi"));
    }

    #[test]
    fn smoke_test_multiline_joined_with_newline() {
        let env = BlockEnv::top_level();
        let (rest, block) = paragraph(span("line one\nline two\n\nafter"), env);
        assert!(matches!(block, Block::Paragraph(Isp::Span(_, ref t)) if t == "line one\nline two"));
        assert_eq!(*rest.fragment(), "after");
    }

    #[test]
    fn smoke_test_broken_by_heading() {
        let env = BlockEnv::top_level();
        let (rest, block) = paragraph(span("hi\n# heading\n"), env);
        assert!(matches!(block, Block::Paragraph(Isp::Span(_, ref t)) if t == "hi"));
        assert_eq!(*rest.fragment(), "# heading\n");
    }
}
