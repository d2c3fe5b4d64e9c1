//! Link/image reference definitions (§4.C "Reference definition").

use crate::diagnostic::{Diagnostic, ErrorKind, MMarkErr};
use crate::refs::{Definition, ReferenceTable};
use crate::span::{start_pos, Span};
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::char as nom_char;

struct ParsedDef<'a> {
    label: Span<'a>,
    uri: String,
    title: Option<String>,
    rest: Span<'a>,
}

fn parse(input: Span) -> Option<ParsedDef> {
    let (after_open, _) = nom_char::<_, nom::error::Error<Span>>('[')(input).ok()?;
    let (after_label, label): (Span, Span) =
        take_till1::<_, _, nom::error::Error<Span>>(|c| c == ']' || c == '\n')(after_open).ok()?;
    let (after_close, _) = nom_char::<_, nom::error::Error<Span>>(']')(after_label).ok()?;
    let (after_colon, _) = nom_char::<_, nom::error::Error<Span>>(':')(after_close).ok()?;
    let (after_gap, _) = crate::scan::sc(after_colon).ok()?;

    let (after_uri, uri) = parse_uri(after_gap)?;
    if uri.is_empty() {
        return None;
    }

    let (after_title_gap, _) = crate::scan::sc_prime(after_uri).ok()?;
    let (after_title, title) = match parse_title(after_title_gap) {
        Some((rest, t)) => (rest, Some(t)),
        None => (after_uri, None),
    };

    let (after_trailing, _) = crate::scan::sc_prime(after_title).ok()?;
    let (rest, _) = crate::scan::eol_prime(after_trailing).ok()?;

    Some(ParsedDef {
        label,
        uri,
        title,
        rest,
    })
}

fn parse_uri(input: Span) -> Option<(Span, String)> {
    if input.fragment().starts_with('<') {
        let (after_open, _) = nom_char::<_, nom::error::Error<Span>>('<')(input).ok()?;
        let (after_uri, raw): (Span, Span) =
            take_till1::<_, _, nom::error::Error<Span>>(|c| c == '>' || c == '\n')(after_open)
                .ok()?;
        let (after_close, _) = nom_char::<_, nom::error::Error<Span>>('>')(after_uri).ok()?;
        Some((after_close, raw.fragment().to_string()))
    } else {
        let raw: String = input
            .fragment()
            .chars()
            .take_while(|c| !c.is_whitespace())
            .collect();
        if raw.is_empty() {
            return None;
        }
        let (rest, _) =
            nom::bytes::complete::take::<_, _, nom::error::Error<Span>>(raw.len())(input).ok()?;
        Some((rest, raw))
    }
}

fn parse_title(input: Span) -> Option<(Span, String)> {
    match input.fragment().chars().next()? {
        c @ ('"' | '\'') => parse_quoted_title(input, c),
        '(' => parse_paren_title(input),
        _ => None,
    }
}

fn parse_paren_title(input: Span) -> Option<(Span, String)> {
    let (after_open, _) = nom_char::<_, nom::error::Error<Span>>('(')(input).ok()?;
    let (after_title, raw): (Span, Span) =
        take_till1::<_, _, nom::error::Error<Span>>(|c| c == ')')(after_open).ok()?;
    let (after_close, _) = nom_char::<_, nom::error::Error<Span>>(')')(after_title).ok()?;
    Some((after_close, raw.fragment().to_string()))
}

fn parse_quoted_title(input: Span, quote: char) -> Option<(Span, String)> {
    let (after_open, _) = nom_char::<_, nom::error::Error<Span>>(quote)(input).ok()?;
    let (after_title, raw): (Span, Span) =
        nom::bytes::complete::take_till::<_, _, nom::error::Error<Span>>(|c| c == quote)(
            after_open,
        )
        .ok()?;
    let (after_close, _) = nom_char::<_, nom::error::Error<Span>>(quote)(after_title).ok()?;
    Some((after_close, raw.fragment().to_string()))
}

pub fn peek_reference_definition(input: Span) -> bool {
    parse(input).is_some()
}

/// Registers the definition and returns the span after it, or `None` if the
/// input at this position isn't a reference definition at all (so the
/// dispatch loop can fall through to the paragraph parser).
pub fn reference_definition<'a>(
    input: Span<'a>,
    defs: &mut ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> Option<Span<'a>> {
    let parsed = parse(input)?;
    let label_text = parsed.label.fragment().to_string();
    let inserted = defs.insert(
        &label_text,
        Definition {
            uri: parsed.uri,
            title: parsed.title,
        },
    );
    if !inserted {
        log::debug!("duplicate reference definition for label {label_text:?}");
        diags.push(Diagnostic::new(
            start_pos(parsed.label),
            ErrorKind::FancyCustom(MMarkErr::DuplicateReferenceDefinition(
                crate::refs::normalize_label(&label_text),
            )),
        ));
    }
    Some(parsed.rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(s: &str) -> Span {
        crate::span::new_span(s, "test.md")
    }

    #[test]
    fn smoke_test_bare_uri_definition() {
        let mut defs = ReferenceTable::new();
        let mut diags = Vec::new();
        let rest = reference_definition(span("[x]: http://e\n"), &mut defs, &mut diags).unwrap();
        assert_eq!(*rest.fragment(), "");
        assert_eq!(defs.lookup("x").unwrap().uri, "http://e");
    }

    #[test]
    fn smoke_test_definition_with_title() {
        let mut defs = ReferenceTable::new();
        let mut diags = Vec::new();
        reference_definition(span("[x]: http://e \"t\"\n"), &mut defs, &mut diags).unwrap();
        assert_eq!(defs.lookup("x").unwrap().title.as_deref(), Some("t"));
    }

    #[test]
    fn smoke_test_duplicate_reported_and_not_overwritten() {
        let mut defs = ReferenceTable::new();
        let mut diags = Vec::new();
        reference_definition(span("[x]: http://a\n"), &mut defs, &mut diags).unwrap();
        reference_definition(span("[x]: http://b\n"), &mut defs, &mut diags).unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(defs.lookup("x").unwrap().uri, "http://a");
    }

    #[test]
    fn smoke_test_not_a_definition_falls_through() {
        assert!(reference_definition(span("plain text\n"), &mut ReferenceTable::new(), &mut Vec::new())
            .is_none());
    }
}
