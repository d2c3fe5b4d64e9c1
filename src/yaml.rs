//! YAML front matter (§6 "YAML front matter").
//!
//! The YAML deserializer itself is an external collaborator (per the scope
//! note in §1); `serde_yml` plays that role here exactly as the teacher's
//! own crate wraps `serde_json` for its document metadata.

use crate::diagnostic::{Diagnostic, ErrorKind, MMarkErr};
use crate::span::{start_pos, Span};
use regex::Regex;
use std::sync::OnceLock;

fn yaml_error_location_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"line (\d+)[,:]? column (\d+)").expect("static pattern is valid")
    })
}

fn is_front_matter_fence(line: &str) -> bool {
    line.trim_end_matches([' ', '\t']) == "---"
}

/// If `input` opens with a `---` fence, consume the front matter block
/// (through its closing fence or EOF) and attempt to decode it. Returns the
/// span positioned after the front matter (unchanged if there was none), the
/// decoded value on success, and a diagnostic on decode failure.
pub fn parse_front_matter(input: Span) -> (Span, Option<serde_yml::Value>, Option<Diagnostic>) {
    let first_line: String = input
        .fragment()
        .chars()
        .take_while(|c| *c != '\n' && *c != '\r')
        .collect();
    if !is_front_matter_fence(&first_line) {
        return (input, None, None);
    }
    let opening_pos = start_pos(input);

    let (after_open, _) = crate::scan::eol_prime(advance_span(input, first_line.len()))
        .unwrap_or((advance_span(input, first_line.len()), false));

    let mut body_lines: Vec<String> = Vec::new();
    let mut rest = after_open;
    loop {
        if rest.fragment().is_empty() {
            break;
        }
        let line: String = rest
            .fragment()
            .chars()
            .take_while(|c| *c != '\n' && *c != '\r')
            .collect();
        let after_line = advance_span(rest, line.len());
        let (after_eol, had_eol) = crate::scan::eol_prime(after_line).unwrap_or((after_line, false));
        if is_front_matter_fence(&line) {
            rest = after_eol;
            break;
        }
        body_lines.push(line);
        rest = after_eol;
        if !had_eol {
            break;
        }
    }

    let joined = body_lines.join("\n");
    match serde_yml::from_str::<serde_yml::Value>(&joined) {
        Ok(value) => (rest, Some(value), None),
        Err(e) => {
            let msg = e.to_string();
            log::debug!("yaml front matter decode failed: {msg}");
            let pos = match yaml_error_location_re().captures(&msg) {
                Some(caps) => {
                    let line: usize = caps[1].parse().unwrap_or(0);
                    let column: usize = caps[2].parse().unwrap_or(0);
                    crate::pos::SourcePos::new(opening_pos.filename.clone(), line + 2, column + 1)
                }
                None => opening_pos,
            };
            let diag = Diagnostic::new(pos, ErrorKind::FancyCustom(MMarkErr::YamlParseError(msg)));
            (rest, None, Some(diag))
        }
    }
}

fn advance_span<'a>(input: Span<'a>, byte_len: usize) -> Span<'a> {
    let (rest, _) = nom::bytes::complete::take::<_, _, nom::error::Error<Span>>(byte_len)(input)
        .expect("byte length derived from the same fragment");
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(s: &str) -> Span {
        crate::span::new_span(s, "test.md")
    }

    #[test]
    fn smoke_test_no_front_matter_is_noop() {
        let (rest, value, diag) = parse_front_matter(span("hello\n"));
        assert!(value.is_none());
        assert!(diag.is_none());
        assert_eq!(*rest.fragment(), "hello\n");
    }

    #[test]
    fn smoke_test_valid_front_matter_decodes() {
        let (rest, value, diag) = parse_front_matter(span("---\nfoo: 1\n---\nhi"));
        assert!(diag.is_none());
        let value = value.unwrap();
        assert_eq!(value["foo"].as_i64(), Some(1));
        assert_eq!(*rest.fragment(), "hi");
    }

    #[test]
    fn smoke_test_front_matter_consumed_through_eof_without_closing_fence() {
        let (rest, _, _) = parse_front_matter(span("---\nfoo: 1"));
        assert_eq!(*rest.fragment(), "");
    }
}
