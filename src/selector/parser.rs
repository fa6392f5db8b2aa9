#![forbid(unsafe_code)]

//! Selector-string parser
//!
//! Turns raw selector text such as `.a > .b:not(&.c), #{$x}` into a
//! [`SelectorTree`]. The parser is intentionally lenient about SCSS forms:
//! leading and trailing combinators, `&` references, `%placeholders` and
//! `#{}` interpolation are all accepted.

use super::node::{NodeId, NodeKind, SelectorTree};
use crate::error::ParseError;

/// Parse a selector list into a tree
///
/// # Errors
///
/// Returns `ParseError::Selector` when the text is empty, contains an empty
/// group, has unterminated strings, comments, attributes, interpolations or
/// pseudo-class arguments, two consecutive combinators, or a character that
/// cannot start a selector component.
pub fn parse_selector(selector: &str) -> Result<SelectorTree, ParseError> {
    let mut parser = Parser {
        src: selector,
        pos: 0,
        tree: SelectorTree::new(),
    };
    let root = parser.tree.root();
    parser.parse_list(root, false)?;
    Ok(parser.tree)
}

/// Parse a selector list and hand each top-level group to `visit`
///
/// # Errors
///
/// Same as [`parse_selector`]; `visit` is not called when parsing fails.
pub fn for_each_group<F>(selector: &str, mut visit: F) -> Result<(), ParseError>
where
    F: FnMut(&SelectorTree, NodeId),
{
    let tree = parse_selector(selector)?;
    for &group in tree.groups() {
        visit(&tree, group);
    }
    Ok(())
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    tree: SelectorTree,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '%') || !c.is_ascii()
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(ahead)
    }

    fn starts_with(&self, text: &str) -> bool {
        self.src[self.pos..].starts_with(text)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.bump();
        }
    }

    /// Comma-separated groups until end of input or, when `nested`, a `)`
    fn parse_list(&mut self, parent: NodeId, nested: bool) -> Result<(), ParseError> {
        loop {
            self.parse_group(parent, nested)?;
            match self.peek() {
                Some(',') => self.bump(),
                Some(')') if nested => return Ok(()),
                // The caller reports unclosed pseudo-class arguments
                None => return Ok(()),
                Some(c) => {
                    return Err(ParseError::selector(
                        self.pos,
                        format!("Unexpected character '{}'", c),
                    ));
                }
            }
        }
    }

    fn parse_group(&mut self, parent: NodeId, nested: bool) -> Result<(), ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let group = self.tree.append(parent, NodeKind::Selector, "", start);

        // Start of a whitespace run that may become a descendant combinator
        let mut pending_space: Option<usize> = None;
        // Last non-comment node kind in this group
        let mut last: Option<NodeKind> = None;
        // Comments seen inside a pending whitespace run, appended once the
        // run is resolved so they follow any synthesized combinator
        let mut deferred: Vec<(usize, String)> = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                ',' => break,
                ')' if nested => break,
                c if is_whitespace(c) => {
                    pending_space.get_or_insert(self.pos);
                    self.bump();
                }
                '>' | '+' | '~' => {
                    if last == Some(NodeKind::Combinator) {
                        return Err(ParseError::selector(
                            self.pos,
                            format!("Unexpected combinator '{}'", c),
                        ));
                    }
                    pending_space = None;
                    self.flush_comments(group, &mut deferred);
                    let len = if self.starts_with(">>>") { 3 } else { 1 };
                    let value = &self.src[self.pos..self.pos + len];
                    self.tree
                        .append(group, NodeKind::Combinator, value, self.pos);
                    self.pos += len;
                    last = Some(NodeKind::Combinator);
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let comment = self.read_comment()?;
                    if pending_space.is_some()
                        && last.is_some_and(|kind| kind != NodeKind::Combinator)
                    {
                        deferred.push(comment);
                    } else {
                        self.tree
                            .append(group, NodeKind::Comment, comment.1, comment.0);
                    }
                }
                _ => {
                    if let Some(at) = pending_space.take()
                        && last.is_some_and(|kind| kind != NodeKind::Combinator)
                    {
                        self.tree.append(group, NodeKind::Combinator, " ", at);
                    }
                    self.flush_comments(group, &mut deferred);
                    last = Some(self.parse_component(group)?);
                }
            }
        }

        self.flush_comments(group, &mut deferred);
        if self.tree.node(group).children().is_empty() {
            return Err(ParseError::selector(start, "Expected a selector"));
        }
        if let Some(&first) = self.tree.node(group).children().first() {
            let first_index = self.tree.node(first).source_index;
            self.tree.set_source_index(group, first_index);
        }
        Ok(())
    }

    /// One simple selector, nesting reference or string
    fn parse_component(&mut self, group: NodeId) -> Result<NodeKind, ParseError> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Err(ParseError::selector(start, "Unexpected end of selector"));
        };

        let kind = match c {
            '.' => {
                self.bump();
                let name = self.read_word()?;
                if name.is_empty() {
                    return Err(ParseError::selector(start, "Expected a class name"));
                }
                self.tree.append(group, NodeKind::Class, name, start);
                NodeKind::Class
            }
            '#' if self.peek_at(1) == Some('{') => {
                let word = self.read_word()?;
                self.tree.append(group, NodeKind::Tag, word, start);
                NodeKind::Tag
            }
            '#' => {
                self.bump();
                let name = self.read_word()?;
                if name.is_empty() {
                    return Err(ParseError::selector(start, "Expected an id"));
                }
                self.tree.append(group, NodeKind::Id, name, start);
                NodeKind::Id
            }
            '[' => {
                let inner = self.read_attribute()?;
                self.tree.append(group, NodeKind::Attribute, inner, start);
                NodeKind::Attribute
            }
            ':' => {
                self.parse_pseudo(group)?;
                NodeKind::Pseudo
            }
            '&' => {
                self.bump();
                self.tree.append(group, NodeKind::Nesting, "&", start);
                NodeKind::Nesting
            }
            '*' => {
                self.bump();
                self.tree.append(group, NodeKind::Universal, "*", start);
                NodeKind::Universal
            }
            '"' | '\'' => {
                let text = self.read_string(c)?;
                self.tree.append(group, NodeKind::String, text, start);
                NodeKind::String
            }
            c if is_word_char(c) || c == '\\' => {
                let word = self.read_word()?;
                self.tree.append(group, NodeKind::Tag, word, start);
                NodeKind::Tag
            }
            c => {
                return Err(ParseError::selector(
                    start,
                    format!("Unexpected character '{}'", c),
                ));
            }
        };
        Ok(kind)
    }

    fn parse_pseudo(&mut self, group: NodeId) -> Result<(), ParseError> {
        let start = self.pos;
        self.bump();
        if self.peek() == Some(':') {
            self.bump();
        }
        let colons = &self.src[start..self.pos];
        let name = self.read_word()?;
        if name.is_empty() {
            return Err(ParseError::selector(start, "Expected a pseudo-class name"));
        }
        let pseudo = self
            .tree
            .append(group, NodeKind::Pseudo, format!("{}{}", colons, name), start);

        if self.peek() != Some('(') {
            return Ok(());
        }
        let open = self.pos;
        self.bump();
        self.skip_whitespace();
        if self.peek() != Some(')') {
            self.parse_list(pseudo, true)?;
        }
        if self.peek() != Some(')') {
            return Err(ParseError::selector(open, "Unclosed pseudo-class argument"));
        }
        self.bump();
        Ok(())
    }

    /// Consume a `/* */` comment, returning its offset and full text
    fn read_comment(&mut self) -> Result<(usize, String), ParseError> {
        let start = self.pos;
        let Some(len) = self.src[start + 2..].find("*/") else {
            return Err(ParseError::selector(start, "Unclosed comment"));
        };
        self.pos = start + 2 + len + 2;
        Ok((start, self.src[start..self.pos].to_string()))
    }

    fn flush_comments(&mut self, group: NodeId, deferred: &mut Vec<(usize, String)>) {
        for (start, text) in deferred.drain(..) {
            self.tree.append(group, NodeKind::Comment, text, start);
        }
    }

    /// Identifier-like run including escapes and `#{}` interpolation
    fn read_word(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                if self.peek().is_none() {
                    return Err(ParseError::selector(start, "Unfinished escape"));
                }
                self.bump();
            } else if c == '#' && self.peek_at(1) == Some('{') {
                self.skip_interpolation()?;
            } else if is_word_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn skip_interpolation(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            self.bump();
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::selector(start, "Unclosed interpolation"))
    }

    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.pos;
        self.bump();
        while let Some(c) = self.peek() {
            self.bump();
            if c == '\\' {
                self.bump();
            } else if c == quote {
                return Ok(self.src[start..self.pos].to_string());
            }
        }
        Err(ParseError::selector(start, "Unclosed string"))
    }

    /// Bracket content of an attribute selector, trimmed
    fn read_attribute(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.bump();
        while let Some(c) = self.peek() {
            match c {
                ']' => {
                    let inner = self.src[start + 1..self.pos].trim().to_string();
                    self.bump();
                    if inner.is_empty() {
                        return Err(ParseError::selector(start, "Empty attribute selector"));
                    }
                    return Ok(inner);
                }
                '"' | '\'' => {
                    self.read_string(c)?;
                }
                _ => self.bump(),
            }
        }
        Err(ParseError::selector(start, "Unclosed attribute selector"))
    }
}
