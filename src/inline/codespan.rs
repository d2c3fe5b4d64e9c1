//! Code spans (§4.E "Code span").

use super::{Cursor, LastChar};
use crate::diagnostic::Diagnostic;
use crate::document::Inline;

fn backtick_run_len(text: &str) -> usize {
    text.chars().take_while(|c| *c == '`').count()
}

/// An opening run of N backticks; content is any text up to a closing run of
/// exactly N backticks (a shorter or longer run is just content). Internal
/// whitespace is collapsed: leading/trailing spaces trimmed, internal runs
/// of space/tab/LF collapsed to a single space.
pub fn parse(cursor: &mut Cursor, last: &mut LastChar) -> Result<Inline, Diagnostic> {
    let open_len = backtick_run_len(cursor.remaining());
    cursor.advance(open_len);

    let mut raw = String::new();
    loop {
        if cursor.is_eof() {
            // No closing run found: the opening backticks are just plain text.
            *last = LastChar::Other;
            return Ok(Inline::Plain(format!("{}{}", "`".repeat(open_len), raw)));
        }
        let text = cursor.remaining();
        let c = text.chars().next().expect("checked not eof");
        if c == '`' {
            let run = backtick_run_len(text);
            if run == open_len {
                cursor.advance(run);
                break;
            }
            raw.push_str(&"`".repeat(run));
            cursor.advance(run);
            continue;
        }
        raw.push(c);
        cursor.advance(c.len_utf8());
    }

    *last = LastChar::Other;
    Ok(Inline::CodeSpan(collapse_whitespace(&raw)))
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::new();
    let mut in_ws = false;
    for c in s.chars() {
        if c == ' ' || c == '\t' || c == '\n' || c == '\r' {
            in_ws = true;
            continue;
        }
        if in_ws && !out.is_empty() {
            out.push(' ');
        }
        in_ws = false;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::SourcePos;

    fn cur(s: &str) -> Cursor {
        Cursor::new(s, SourcePos::new("t", 1, 1))
    }

    #[test]
    fn smoke_test_simple_code_span() {
        let mut c = cur("`foo`");
        let mut last = LastChar::Nothing;
        let inline = parse(&mut c, &mut last).unwrap();
        assert_eq!(inline, Inline::CodeSpan("foo".to_string()));
    }

    #[test]
    fn smoke_test_whitespace_collapsed() {
        let mut c = cur("`` a   b\nc ``");
        let mut last = LastChar::Nothing;
        let inline = parse(&mut c, &mut last).unwrap();
        assert_eq!(inline, Inline::CodeSpan("a b c".to_string()));
    }

    #[test]
    fn smoke_test_shorter_inner_run_is_content() {
        let mut c = cur("``a`b``");
        let mut last = LastChar::Nothing;
        let inline = parse(&mut c, &mut last).unwrap();
        assert_eq!(inline, Inline::CodeSpan("a`b".to_string()));
    }
}
