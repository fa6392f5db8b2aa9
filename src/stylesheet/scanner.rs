#![forbid(unsafe_code)]

//! Stylesheet scanner
//!
//! Finds every style rule in a CSS or SCSS source together with the kind of
//! node that encloses it. Declarations and at-rule statements are skipped;
//! only block structure and selector preludes matter to the rules.

use crate::error::ParseError;
use crate::types::Syntax;
use std::ops::Range;

/// The node a style rule is directly nested in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleParent {
    /// Document root
    Root,
    /// At-rule block such as `@media` or `@include`
    AtRule { name: String },
    /// Another style rule
    Rule,
}

impl RuleParent {
    /// Whether a rule with this parent is outside any style rule
    pub fn is_top_level(&self) -> bool {
        matches!(self, RuleParent::Root | RuleParent::AtRule { .. })
    }
}

/// A style rule: a selector prelude followed by a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Selector text without surrounding whitespace
    pub selector: String,
    /// Byte offset of the selector in the source
    pub selector_offset: usize,
    pub parent: RuleParent,
    /// Number of enclosing style rules
    pub depth: usize,
}

/// Style rules of one source, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub syntax: Syntax,
    pub rules: Vec<StyleRule>,
}

#[derive(Debug)]
enum Block {
    AtRule(String),
    Rule,
    /// SCSS nested property block (`font: { family: x; }`)
    Property,
}

/// Scan `source` for style rules
///
/// # Errors
///
/// Returns `ParseError::Stylesheet` for an unmatched `}`, an unclosed block,
/// an unterminated comment, string or interpolation, or a block without a
/// prelude.
pub fn parse_stylesheet(source: &str, syntax: Syntax) -> Result<Stylesheet, ParseError> {
    Scanner {
        src: source,
        syntax,
        pos: 0,
        stack: Vec::new(),
        rules: Vec::new(),
        line_comments: Vec::new(),
    }
    .run()
}

struct Scanner<'a> {
    src: &'a str,
    syntax: Syntax,
    pos: usize,
    /// Open blocks with the offset of their `{`
    stack: Vec<(Block, usize)>,
    rules: Vec<StyleRule>,
    /// `//` comment spans seen since the last block boundary
    line_comments: Vec<Range<usize>>,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(ahead)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn run(mut self) -> Result<Stylesheet, ParseError> {
        // Offset of the first significant character of the current statement
        let mut statement: Option<usize> = None;
        let mut parens = 0usize;

        while let Some(c) = self.peek() {
            match c {
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment()?,
                '/' if self.peek_at(1) == Some('/')
                    && parens == 0
                    && self.syntax.has_line_comments() =>
                {
                    self.skip_line_comment();
                }
                c if c.is_whitespace() => self.bump(),
                '"' | '\'' => {
                    statement.get_or_insert(self.pos);
                    self.skip_string(c)?;
                }
                '#' if self.peek_at(1) == Some('{') => {
                    statement.get_or_insert(self.pos);
                    self.skip_interpolation()?;
                }
                '(' | '[' => {
                    statement.get_or_insert(self.pos);
                    parens += 1;
                    self.bump();
                }
                ')' | ']' => {
                    parens = parens.saturating_sub(1);
                    self.bump();
                }
                '{' if parens == 0 => {
                    let start = statement.take().ok_or_else(|| {
                        ParseError::stylesheet(self.pos, "Expected a selector or at-rule before '{'")
                    })?;
                    self.open_block(start);
                    self.bump();
                }
                ';' if parens == 0 => {
                    statement = None;
                    self.line_comments.clear();
                    self.bump();
                }
                '}' if parens == 0 => {
                    // A trailing declaration without `;` ends here too
                    statement = None;
                    self.line_comments.clear();
                    if self.stack.pop().is_none() {
                        return Err(ParseError::stylesheet(self.pos, "Unexpected '}'"));
                    }
                    self.bump();
                }
                _ => {
                    statement.get_or_insert(self.pos);
                    self.bump();
                }
            }
        }

        if let Some((_, open)) = self.stack.last() {
            return Err(ParseError::stylesheet(*open, "Unclosed block"));
        }

        Ok(Stylesheet {
            syntax: self.syntax,
            rules: self.rules,
        })
    }

    fn open_block(&mut self, start: usize) {
        let masked = self.prelude_text(start);
        let prelude = masked.trim_end();

        let block = if let Some(rest) = prelude.strip_prefix('@') {
            let name: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .collect();
            Block::AtRule(name)
        } else if prelude.ends_with(':') {
            Block::Property
        } else {
            let parent = match self.stack.last() {
                None => RuleParent::Root,
                Some((Block::AtRule(name), _)) => RuleParent::AtRule { name: name.clone() },
                Some((Block::Rule | Block::Property, _)) => RuleParent::Rule,
            };
            let depth = self
                .stack
                .iter()
                .filter(|(block, _)| matches!(block, Block::Rule))
                .count();
            self.rules.push(StyleRule {
                selector: prelude.to_string(),
                selector_offset: start,
                parent,
                depth,
            });
            Block::Rule
        };

        self.stack.push((block, self.pos));
        self.line_comments.clear();
    }

    /// Source of the prelude starting at `start`, with each `//` comment
    /// replaced by a block comment of the same byte length so selector
    /// offsets still map onto the source
    fn prelude_text(&self, start: usize) -> String {
        let mut text = String::with_capacity(self.pos - start);
        let mut copied = start;
        for span in self.line_comments.iter().filter(|span| span.start >= start) {
            text.push_str(&self.src[copied..span.start]);
            let len = span.len();
            if len >= 4 {
                text.push_str("/*");
                text.extend(std::iter::repeat_n(' ', len - 4));
                text.push_str("*/");
            } else {
                text.extend(std::iter::repeat_n(' ', len));
            }
            copied = span.end;
        }
        text.push_str(&self.src[copied..self.pos]);
        text
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.src[start + 2..].find("*/") {
            Some(len) => {
                self.pos = start + 2 + len + 2;
                Ok(())
            }
            None => Err(ParseError::stylesheet(start, "Unclosed comment")),
        }
    }

    fn skip_line_comment(&mut self) {
        let start = self.pos;
        let end = match self.src[start..].find('\n') {
            Some(len) => start + len,
            None => self.src.len(),
        };
        self.line_comments.push(start..end);
        self.pos = end;
    }

    fn skip_string(&mut self, quote: char) -> Result<(), ParseError> {
        let start = self.pos;
        self.bump();
        while let Some(c) = self.peek() {
            self.bump();
            if c == '\\' {
                self.bump();
            } else if c == quote {
                return Ok(());
            } else if c == '\n' {
                break;
            }
        }
        Err(ParseError::stylesheet(start, "Unclosed string"))
    }

    fn skip_interpolation(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            match c {
                '"' | '\'' => {
                    self.skip_string(c)?;
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.bump();
        }
        Err(ParseError::stylesheet(start, "Unclosed interpolation"))
    }
}
