//! Bracket parser
//!
//!     A small recursive-descent parser over the shared token stream. It knows nothing about
//!     discourse: it only turns balanced brackets into a generic [`Bracket`] tree, which the
//!     concrete format readers then interpret.
//!
//!     Two surface syntaxes are supported:
//!
//!         - s-expressions, `(label item*)`, used by dis and hs2015
//!         - calls, `Name(arg, [arg, ...])`, used by hilda
//!
//!     In call syntax a square-bracket list becomes a [`Bracket`] with an empty label, and
//!     quoted strings become text items. Anything left after the root node, or any
//!     unbalanced delimiter, is a malformed-input error carrying the byte offset.

use super::error::{ConversionError, ConversionResult};
use super::lexing::{tokenize, Spanned, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    SExpression,
    Call,
}

/// One bracketed node: its label and its items in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracket {
    pub label: String,
    pub items: Vec<BracketItem>,
    /// Byte offset of the opening token.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketItem {
    Node(Bracket),
    Word(String, usize),
    Text(String, usize),
}

impl BracketItem {
    pub fn offset(&self) -> usize {
        match self {
            BracketItem::Node(node) => node.offset,
            BracketItem::Word(_, offset) | BracketItem::Text(_, offset) => *offset,
        }
    }

    pub fn as_node(&self) -> Option<&Bracket> {
        match self {
            BracketItem::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl Bracket {
    /// Child nodes, skipping words and text.
    pub fn nodes(&self) -> impl Iterator<Item = &Bracket> {
        self.items.iter().filter_map(BracketItem::as_node)
    }

    /// The first child node with the given label.
    pub fn find(&self, label: &str) -> Option<&Bracket> {
        self.nodes().find(|node| node.label == label)
    }

    /// Words directly inside this node.
    pub fn words(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                BracketItem::Word(word, _) => Some(word.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The text of the first text item directly inside this node.
    pub fn text(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            BracketItem::Text(text, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Parse a whole document holding exactly one root node.
pub fn parse_brackets(source: &str, syntax: Syntax) -> ConversionResult<Bracket> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
    };

    let root = match syntax {
        Syntax::SExpression => parser.sexpr()?,
        Syntax::Call => parser.call_root()?,
    };

    if let Some((token, span)) = parser.peek() {
        return Err(ConversionError::malformed_at(
            format!("unexpected {} after the root node", token.describe()),
            span.start,
        ));
    }
    Ok(root)
}

struct Parser<'t> {
    tokens: &'t [Spanned],
    pos: usize,
    end: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> ConversionResult<&'t Spanned> {
        let spanned = self.tokens.get(self.pos).ok_or_else(|| {
            ConversionError::malformed_at("unexpected end of input", self.end)
        })?;
        self.pos += 1;
        Ok(spanned)
    }

    fn expect(&mut self, expected: Token) -> ConversionResult<usize> {
        let (token, span) = self.next()?;
        if *token == expected {
            Ok(span.start)
        } else {
            Err(ConversionError::malformed_at(
                format!("expected {}, found {}", expected.describe(), token.describe()),
                span.start,
            ))
        }
    }

    fn sexpr(&mut self) -> ConversionResult<Bracket> {
        let offset = self.expect(Token::OpenParen)?;
        let label = match self.next()? {
            (Token::Word(word), _) => word.clone(),
            (token, span) => {
                return Err(ConversionError::malformed_at(
                    format!("expected a node label, found {}", token.describe()),
                    span.start,
                ))
            }
        };

        let mut items = Vec::new();
        loop {
            let (token, span) = match self.peek() {
                Some(spanned) => spanned,
                None => {
                    return Err(ConversionError::malformed_at(
                        format!("unbalanced '(': node '{}' is never closed", label),
                        offset,
                    ))
                }
            };
            match token {
                Token::CloseParen => {
                    self.pos += 1;
                    return Ok(Bracket {
                        label,
                        items,
                        offset,
                    });
                }
                Token::OpenParen => items.push(BracketItem::Node(self.sexpr()?)),
                Token::Word(word) => {
                    self.pos += 1;
                    items.push(BracketItem::Word(word.clone(), span.start));
                }
                Token::Text(text) | Token::Quoted(text) => {
                    self.pos += 1;
                    items.push(BracketItem::Text(text.clone(), span.start));
                }
                other => {
                    return Err(ConversionError::malformed_at(
                        format!("unexpected {} inside '{}'", other.describe(), label),
                        span.start,
                    ))
                }
            }
        }
    }

    fn call_root(&mut self) -> ConversionResult<Bracket> {
        match self.value()? {
            BracketItem::Node(node) => Ok(node),
            other => Err(ConversionError::malformed_at(
                "expected a tree node at the top level",
                other.offset(),
            )),
        }
    }

    fn value(&mut self) -> ConversionResult<BracketItem> {
        let (token, span) = self.next()?;
        match token {
            Token::Word(name) => {
                if matches!(self.peek(), Some((Token::OpenParen, _))) {
                    self.pos += 1;
                    let items = self.arguments(Token::CloseParen)?;
                    Ok(BracketItem::Node(Bracket {
                        label: name.clone(),
                        items,
                        offset: span.start,
                    }))
                } else {
                    Ok(BracketItem::Word(name.clone(), span.start))
                }
            }
            Token::OpenBracket => {
                let items = self.arguments(Token::CloseBracket)?;
                Ok(BracketItem::Node(Bracket {
                    label: String::new(),
                    items,
                    offset: span.start,
                }))
            }
            Token::Quoted(text) | Token::Text(text) => {
                Ok(BracketItem::Text(text.clone(), span.start))
            }
            other => Err(ConversionError::malformed_at(
                format!("unexpected {}", other.describe()),
                span.start,
            )),
        }
    }

    /// Comma separated values up to `close`; a trailing comma is accepted.
    fn arguments(&mut self, close: Token) -> ConversionResult<Vec<BracketItem>> {
        let mut items = Vec::new();
        loop {
            if let Some((token, _)) = self.peek() {
                if *token == close {
                    self.pos += 1;
                    return Ok(items);
                }
            }
            items.push(self.value()?);
            let (token, span) = self.next()?;
            if *token == close {
                return Ok(items);
            }
            if *token != Token::Comma {
                return Err(ConversionError::malformed_at(
                    format!("expected ',' or {}, found {}", close.describe(), token.describe()),
                    span.start,
                ));
            }
        }
    }
}
