//! Selector engine for the document model
//!
//! Supports the subset of CSS the role map needs: type, `#id`, `.class`,
//! attribute matchers (`[a]`, `[a="v"]`, `[a*="v"]`, `[a^="v"]`), the
//! descendant combinator and comma-separated groups.

use crate::error::{Result, UiError};
use std::fmt;
use std::str::FromStr;

/// How an attribute matcher compares its value
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatcher {
    name: String,
    op: AttrOp,
}

/// A single compound selector such as `button.primary[title]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatcher>,
}

/// Compounds joined by descendant combinators, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<Compound>,
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Complex>,
}

/// Read-only view of an element used while matching
pub trait Matchable {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: &str| UiError::InvalidSelector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };

        let mut groups = Vec::new();
        for group in split_top_level(source, ',') {
            let group = group.trim();
            if group.is_empty() {
                return Err(invalid("empty selector group"));
            }
            let mut parts = Vec::new();
            for token in split_top_level(group, ' ') {
                if token.is_empty() {
                    continue;
                }
                parts.push(parse_compound(token).map_err(|reason| invalid(&reason))?);
            }
            groups.push(Complex { parts });
        }

        if groups.is_empty() {
            return Err(invalid("empty selector"));
        }

        Ok(Self {
            source: source.to_string(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match `subject` against this selector
    ///
    /// `ancestors` yields the subject's ancestors nearest first.
    pub fn matches<'a, M, I>(&self, subject: &M, ancestors: I) -> bool
    where
        M: Matchable + 'a,
        I: IntoIterator<Item = &'a M> + Clone,
    {
        self.groups
            .iter()
            .any(|complex| complex.matches(subject, ancestors.clone()))
    }
}

impl FromStr for Selector {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl Complex {
    fn matches<'a, M, I>(&self, subject: &M, ancestors: I) -> bool
    where
        M: Matchable + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(subject) {
            return false;
        }

        // Greedy right-to-left walk is exact for descendant-only chains
        let mut pending = rest.iter().rev().peekable();
        for ancestor in ancestors {
            match pending.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    pending.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        pending.peek().is_none()
    }
}

impl Compound {
    fn matches<M: Matchable + ?Sized>(&self, el: &M) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = el.attr("class").unwrap_or("");
            let present = |c: &String| class_attr.split_whitespace().any(|have| have == c);
            if !self.classes.iter().all(present) {
                return false;
            }
        }
        self.attrs.iter().all(|m| {
            let Some(value) = el.attr(&m.name) else {
                return false;
            };
            match &m.op {
                AttrOp::Exists => true,
                AttrOp::Equals(v) => value == v,
                AttrOp::Contains(v) => value.contains(v.as_str()),
                AttrOp::Prefix(v) => value.starts_with(v.as_str()),
            }
        })
    }
}

/// Split on `sep` outside brackets and quotes
fn split_top_level(input: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if c == sep && depth == 0 => {
                out.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&input[start..]);
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(token: &str) -> std::result::Result<Compound, String> {
    let chars: Vec<char> = token.chars().collect();
    let mut compound = Compound::default();
    let mut i = 0;

    let read_ident = |i: &mut usize| -> String {
        let start = *i;
        while *i < chars.len() && is_ident_char(chars[*i]) {
            *i += 1;
        }
        chars[start..*i].iter().collect()
    };

    if i < chars.len() && chars[i] == '*' {
        i += 1;
    } else if i < chars.len() && is_ident_char(chars[i]) {
        compound.tag = Some(read_ident(&mut i).to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let id = read_ident(&mut i);
                if id.is_empty() {
                    return Err("expected id after '#'".into());
                }
                compound.id = Some(id);
            }
            '.' => {
                i += 1;
                let class = read_ident(&mut i);
                if class.is_empty() {
                    return Err("expected class after '.'".into());
                }
                compound.classes.push(class);
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|&c| c == ']')
                    .map(|p| p + i)
                    .ok_or("unterminated attribute matcher")?;
                let body: String = chars[i + 1..close].iter().collect();
                compound.attrs.push(parse_attr(&body)?);
                i = close + 1;
            }
            other => return Err(format!("unexpected '{}'", other)),
        }
    }

    Ok(compound)
}

fn parse_attr(body: &str) -> std::result::Result<AttrMatcher, String> {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string();

    let (name, op) = if let Some((name, value)) = body.split_once("*=") {
        (name, AttrOp::Contains(unquote(value)))
    } else if let Some((name, value)) = body.split_once("^=") {
        (name, AttrOp::Prefix(unquote(value)))
    } else if let Some((name, value)) = body.split_once('=') {
        (name, AttrOp::Equals(unquote(value)))
    } else {
        (body, AttrOp::Exists)
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(format!("bad attribute name '{}'", name));
    }

    Ok(AttrMatcher {
        name: name.to_string(),
        op,
    })
}
