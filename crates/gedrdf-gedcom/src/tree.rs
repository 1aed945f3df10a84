//! GEDCOM line tokenizer and tree builder.
//!
//! Each line has the shape `LEVEL [@XREF@] TAG [VALUE]`. Lines are grouped
//! into a tree by level: a line at level `n + 1` is a child of the nearest
//! preceding line at level `n`.

use crate::error::GedcomError;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0, space1},
    combinator::{map_res, opt, rest},
    sequence::{delimited, preceded, terminated},
    IResult,
};

/// One tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine<'a> {
    pub level: usize,
    pub xref: Option<&'a str>,
    pub tag: &'a str,
    /// `None` when the line ends after the tag; `Some("")` when a separator
    /// space is present with nothing after it.
    pub value: Option<&'a str>,
}

/// A line together with its nested sub-lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomNode {
    pub line: usize,
    pub level: usize,
    pub xref: Option<String>,
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<GedcomNode>,
}

impl GedcomNode {
    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&GedcomNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn children_with<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GedcomNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Value of the first child with the given tag, if that child exists.
    pub fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(|c| c.value.as_deref().unwrap_or(""))
    }
}

fn parse_xref(input: &str) -> IResult<&str, &str> {
    delimited(char('@'), take_while1(|c: char| c != '@'), char('@'))(input)
}

fn parse_tag(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// Parse a single line (without its terminator).
pub fn parse_line(input: &str) -> IResult<&str, GedcomLine<'_>> {
    let (input, _) = space0(input)?;
    let (input, level) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = space1(input)?;
    let (input, xref) = opt(terminated(parse_xref, space1))(input)?;
    let (input, tag) = parse_tag(input)?;
    let (input, value) = opt(preceded(char(' '), rest))(input)?;
    Ok((
        input,
        GedcomLine {
            level,
            xref,
            tag,
            value,
        },
    ))
}

/// Tokenize `text` and build the record forest (one root per level-0 line).
pub fn parse_tree(text: &str) -> Result<Vec<GedcomNode>, GedcomError> {
    let mut roots: Vec<GedcomNode> = Vec::new();
    let mut open: Vec<GedcomNode> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let raw = if i == 0 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };
        if raw.trim().is_empty() {
            continue;
        }

        let parsed = match parse_line(raw) {
            Ok(("", parsed)) => parsed,
            Ok((trailing, _)) => {
                return Err(GedcomError::Line {
                    line: line_no,
                    message: format!("unexpected trailing input `{trailing}`"),
                })
            }
            Err(e) => {
                return Err(GedcomError::Line {
                    line: line_no,
                    message: format!("malformed line `{raw}`: {e}"),
                })
            }
        };

        if parsed.level > open.len() {
            return Err(GedcomError::Line {
                line: line_no,
                message: format!(
                    "level {} skips a level (expected at most {})",
                    parsed.level,
                    open.len()
                ),
            });
        }
        while open.len() > parsed.level {
            close_top(&mut open, &mut roots);
        }

        open.push(GedcomNode {
            line: line_no,
            level: parsed.level,
            xref: parsed.xref.map(str::to_string),
            tag: parsed.tag.to_string(),
            value: parsed.value.map(str::to_string),
            children: Vec::new(),
        });
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }
    Ok(roots)
}

fn close_top(open: &mut Vec<GedcomNode>, roots: &mut Vec<GedcomNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
