//! Links, images, and autolinks (§4.E "Link", "Image", "Autolink").

use super::{parse_until_bracket, Cursor, InlineEnv, LastChar};
use crate::diagnostic::{Diagnostic, ErrorKind, MMarkErr};
use crate::document::Inline;
use crate::pos::NonEmpty;
use crate::refs::ReferenceTable;
use regex::Regex;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
            .expect("static email pattern is valid")
    })
}

struct Location {
    uri: String,
    title: Option<String>,
}

/// Consume whatever the cursor is sitting on after a link/image's closing
/// `]`: an inline `(uri title)`, a `[label]` reference, a collapsed `[]`, or
/// nothing (shortcut). `fallback_label` is the plain-text rendering of the
/// already-parsed inner/alt content, used for the collapsed and shortcut
/// forms.
fn parse_location(
    cursor: &mut Cursor,
    defs: &ReferenceTable,
    fallback_label: &str,
) -> Result<Location, Diagnostic> {
    if cursor.peek() == Some('(') {
        return parse_inline_location(cursor);
    }
    if cursor.peek() == Some('[') {
        let label_pos = cursor.pos();
        cursor.advance(1);
        if cursor.peek() == Some(']') {
            cursor.advance(1);
            return lookup(defs, fallback_label, label_pos);
        }
        let label: String = cursor
            .remaining()
            .chars()
            .take_while(|c| *c != ']')
            .collect();
        cursor.advance(label.len());
        if cursor.peek() != Some(']') {
            return Err(cursor.err(MMarkErr::could_not_find_reference_definition(
                label,
                Vec::new(),
            )));
        }
        cursor.advance(1);
        return lookup(defs, &label, label_pos);
    }
    let label_pos = cursor.pos();
    lookup(defs, fallback_label, label_pos)
}

fn lookup(
    defs: &ReferenceTable,
    label: &str,
    pos: crate::pos::SourcePos,
) -> Result<Location, Diagnostic> {
    match defs.lookup(label) {
        Some(def) => Ok(Location {
            uri: def.uri.clone(),
            title: def.title.clone(),
        }),
        None => Err(Diagnostic::new(
            pos,
            ErrorKind::FancyCustom(MMarkErr::could_not_find_reference_definition(
                label,
                defs.candidates(),
            )),
        )),
    }
}

fn parse_inline_location(cursor: &mut Cursor) -> Result<Location, Diagnostic> {
    cursor.advance(1); // '('
    skip_sc(cursor);
    let uri = parse_uri(cursor)?;
    if uri.is_empty() {
        return Err(cursor.err(MMarkErr::NonFlankingDelimiterRun("(".to_string())));
    }
    skip_sc(cursor);
    let title = parse_title(cursor);
    skip_sc(cursor);
    if cursor.peek() != Some(')') {
        return Err(cursor.err(MMarkErr::NonFlankingDelimiterRun(")".to_string())));
    }
    cursor.advance(1);
    Ok(Location { uri, title })
}

fn skip_sc(cursor: &mut Cursor) {
    let n: usize = cursor
        .remaining()
        .chars()
        .take_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .map(|c| c.len_utf8())
        .sum();
    cursor.advance(n);
}

fn parse_uri(cursor: &mut Cursor) -> Result<String, Diagnostic> {
    if cursor.peek() == Some('<') {
        cursor.advance(1);
        let raw: String = cursor
            .remaining()
            .chars()
            .take_while(|c| *c != '>' && *c != '\n')
            .collect();
        cursor.advance(raw.len());
        if cursor.peek() != Some('>') {
            return Err(cursor.err(MMarkErr::NonFlankingDelimiterRun("<".to_string())));
        }
        cursor.advance(1);
        Ok(raw)
    } else {
        let raw: String = cursor
            .remaining()
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != ')')
            .collect();
        cursor.advance(raw.len());
        Ok(raw)
    }
}

fn parse_title(cursor: &mut Cursor) -> Option<String> {
    let quote = match cursor.peek()? {
        c @ ('"' | '\'') => c,
        _ => return None,
    };
    let snapshot = cursor.clone();
    cursor.advance(1);
    let raw: String = cursor.remaining().chars().take_while(|c| *c != quote).collect();
    cursor.advance(raw.len());
    if cursor.peek() != Some(quote) {
        *cursor = snapshot;
        return None;
    }
    cursor.advance(1);
    Some(raw)
}

fn render_plain(inlines: &[Inline]) -> String {
    fn push(buf: &mut String, inline: &Inline) {
        match inline {
            Inline::Plain(s) => buf.push_str(s),
            Inline::LineBreak => buf.push(' '),
            Inline::CodeSpan(s) => buf.push_str(s),
            Inline::Emphasis(inner)
            | Inline::Strong(inner)
            | Inline::Strikeout(inner)
            | Inline::Subscript(inner)
            | Inline::Superscript(inner) => {
                for i in inner.iter() {
                    push(buf, i);
                }
            }
            Inline::Link { inner, .. } => {
                for i in inner.iter() {
                    push(buf, i);
                }
            }
            Inline::Image { alt, .. } => {
                for i in alt.iter() {
                    push(buf, i);
                }
            }
        }
    }
    let mut buf = String::new();
    for inline in inlines {
        push(&mut buf, inline);
    }
    buf.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse_link(
    cursor: &mut Cursor,
    env: InlineEnv,
    last: &mut LastChar,
    defs: &ReferenceTable,
) -> Result<Inline, Diagnostic> {
    let snapshot = cursor.clone();
    cursor.advance(1); // '['
    let mut inner_last = LastChar::Nothing;
    let (inner, terminated) =
        parse_until_bracket(cursor, env.no_links(), &mut inner_last, defs)?;
    if !terminated {
        *cursor = snapshot;
        cursor.advance(1);
        *last = super::classify_last_char('[');
        return Ok(Inline::Plain("[".to_string()));
    }
    cursor.advance(1); // ']'
    let Some(inner_ne) = NonEmpty::from_vec(inner.clone()) else {
        return Err(cursor.err(MMarkErr::NonFlankingDelimiterRun("[]".to_string())));
    };
    let fallback_label = render_plain(&inner);
    let location = parse_location(cursor, defs, &fallback_label)?;
    *last = LastChar::Other;
    Ok(Inline::Link {
        inner: inner_ne,
        uri: location.uri,
        title: location.title,
    })
}

pub fn parse_image(
    cursor: &mut Cursor,
    env: InlineEnv,
    last: &mut LastChar,
    defs: &ReferenceTable,
) -> Result<Inline, Diagnostic> {
    cursor.advance(1); // '!'
    let snapshot = cursor.clone();
    cursor.advance(1); // '['
    let mut inner_last = LastChar::Nothing;
    let (alt, terminated) =
        parse_until_bracket(cursor, env.no_images(), &mut inner_last, defs)?;
    if !terminated {
        *cursor = snapshot;
        cursor.advance(1);
        *last = super::classify_last_char('[');
        return Ok(Inline::Plain("![".to_string()));
    }
    cursor.advance(1); // ']'
    let alt_ne = NonEmpty::from_vec(alt.clone())
        .unwrap_or_else(|| NonEmpty::new(Inline::Plain(String::new())));
    let fallback_label = render_plain(&alt);
    let location = parse_location(cursor, defs, &fallback_label)?;
    *last = LastChar::Other;
    Ok(Inline::Image {
        alt: alt_ne,
        uri: location.uri,
        title: location.title,
    })
}

/// `< URI >` with no internal whitespace. A bare email rewrites to
/// `mailto:` with the raw email as display text; anything else renders the
/// URI text verbatim. Returns `None` (consuming nothing) if what follows `<`
/// isn't a well-formed autolink, so the caller can fall back to plain text.
pub fn try_autolink(cursor: &mut Cursor, last: &mut LastChar) -> Option<Inline> {
    let snapshot = cursor.clone();
    cursor.advance(1); // '<'
    let raw: String = cursor
        .remaining()
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '>')
        .collect();
    if raw.is_empty() || cursor.remaining()[raw.len()..].chars().next() != Some('>') {
        *cursor = snapshot;
        return None;
    }
    cursor.advance(raw.len() + 1);
    *last = LastChar::Other;

    if !raw.contains(':') && email_re().is_match(&raw) {
        return Some(Inline::Link {
            inner: NonEmpty::new(Inline::Plain(raw.clone())),
            uri: format!("mailto:{raw}"),
            title: None,
        });
    }
    Some(Inline::Link {
        inner: NonEmpty::new(Inline::Plain(raw.clone())),
        uri: raw,
        title: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::SourcePos;
    use crate::refs::Definition;

    fn cur(s: &str) -> Cursor {
        Cursor::new(s, SourcePos::new("t", 1, 1))
    }

    #[test]
    fn smoke_test_reference_link_resolves() {
        let mut defs = ReferenceTable::new();
        defs.insert(
            "x",
            Definition {
                uri: "http://e".to_string(),
                title: None,
            },
        );
        let mut c = cur("[x]");
        let mut last = LastChar::Nothing;
        let inline = parse_link(&mut c, InlineEnv::top(), &mut last, &defs).unwrap();
        match inline {
            Inline::Link { uri, .. } => assert_eq!(uri, "http://e"),
            _ => panic!("not a link"),
        }
    }

    #[test]
    fn smoke_test_missing_reference_is_error() {
        let defs = ReferenceTable::new();
        let mut c = cur("[oops]");
        let mut last = LastChar::Nothing;
        let err = parse_link(&mut c, InlineEnv::top(), &mut last, &defs).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::FancyCustom(MMarkErr::CouldNotFindReferenceDefinition { .. })
        ));
    }

    #[test]
    fn smoke_test_inline_link_with_title() {
        let defs = ReferenceTable::new();
        let mut c = cur("[a](http://e \"t\")");
        let mut last = LastChar::Nothing;
        let inline = parse_link(&mut c, InlineEnv::top(), &mut last, &defs).unwrap();
        match inline {
            Inline::Link { uri, title, .. } => {
                assert_eq!(uri, "http://e");
                assert_eq!(title.as_deref(), Some("t"));
            }
            _ => panic!("not a link"),
        }
    }

    #[test]
    fn smoke_test_autolink_plain_uri() {
        let mut c = cur("<http://example.com>");
        let mut last = LastChar::Nothing;
        let inline = try_autolink(&mut c, &mut last).unwrap();
        match inline {
            Inline::Link { uri, .. } => assert_eq!(uri, "http://example.com"),
            _ => panic!("not a link"),
        }
    }

    #[test]
    fn smoke_test_autolink_email_rewritten() {
        let mut c = cur("<a@example.com>");
        let mut last = LastChar::Nothing;
        let inline = try_autolink(&mut c, &mut last).unwrap();
        match inline {
            Inline::Link { uri, inner, .. } => {
                assert_eq!(uri, "mailto:a@example.com");
                assert_eq!(inner.first(), &Inline::Plain("a@example.com".to_string()));
            }
            _ => panic!("not a link"),
        }
    }
}
