//! Bracket tokenizer
//!
//!     All bracket formats (dis, hs2015, hilda) share one logos lexer. The token set is the union
//!     of what they need: parentheses for s-expressions, square brackets and commas for the
//!     call-style trees, bare words for labels and numbers, quoted strings, and `_!…_!` text
//!     spans.
//!
//!     Text spans are lexed by a callback rather than a regex because the EDU text between the
//!     markers may contain anything, parentheses included. The callback scans the remainder for
//!     the closing marker and bumps the lexer past it.
//!
//!     Whitespace between tokens is skipped. Every token keeps its byte span so parse errors can
//!     point at the offending offset.

use std::ops::Range;

use logos::{Lexer, Logos};

use super::error::{ConversionError, ConversionResult};

/// Opening and closing marker of an EDU text span.
pub const TEXT_MARKER: &str = "_!";

#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"\s+")]
pub enum Token {
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,

    // `_!` is longer than the `_` a word could start with, so it wins
    #[token("_!", lex_text)]
    Text(String),

    #[regex(r#"'([^'\\]|\\.)*'"#, lex_quoted)]
    #[regex(r#""([^"\\]|\\.)*""#, lex_quoted)]
    Quoted(String),

    #[regex(r#"[^\s()\[\],'"!]+"#, |lex| lex.slice().to_string())]
    Word(String),
}

impl Token {
    pub fn is_open(&self) -> bool {
        matches!(self, Token::OpenParen | Token::OpenBracket)
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Token::CloseParen | Token::CloseBracket)
    }

    /// Short human description, used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            Token::OpenParen => "'('".to_string(),
            Token::CloseParen => "')'".to_string(),
            Token::OpenBracket => "'['".to_string(),
            Token::CloseBracket => "']'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Text(_) => "text span".to_string(),
            Token::Quoted(value) => format!("string {:?}", value),
            Token::Word(word) => format!("'{}'", word),
        }
    }
}

fn lex_text(lex: &mut Lexer<Token>) -> Option<String> {
    let rest = lex.remainder();
    let end = rest.find(TEXT_MARKER)?;
    let text = rest[..end].to_string();
    lex.bump(end + TEXT_MARKER.len());
    Some(text)
}

fn lex_quoted(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Resolve the backslash escapes of a quoted string. Unknown escapes are kept verbatim.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(escaped @ ('\\' | '\'' | '"')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Characters that end a bare word.
const WORD_BREAKS: &[char] = &['(', ')', '[', ']', ',', '\'', '"', '!'];

/// True when `value` reads back as exactly one [`Token::Word`].
pub fn is_word(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| c.is_whitespace() || WORD_BREAKS.contains(&c))
}

/// A token with its byte range in the source.
pub type Spanned = (Token, Range<usize>);

/// Tokenize a bracket document, failing on the first byte no token accepts.
pub fn tokenize(source: &str) -> ConversionResult<Vec<Spanned>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let message = if lexer.slice().starts_with(TEXT_MARKER) {
                    "unterminated text span".to_string()
                } else {
                    format!("unexpected input {:?}", lexer.slice())
                };
                return Err(ConversionError::malformed_at(message, span.start));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rst::error::ErrorKind;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_dis_leaf() {
        assert_eq!(
            kinds("( Nucleus (leaf 1) (rel2par span) (text _!foo (bar)_!) )"),
            vec![
                Token::OpenParen,
                Token::Word("Nucleus".into()),
                Token::OpenParen,
                Token::Word("leaf".into()),
                Token::Word("1".into()),
                Token::CloseParen,
                Token::OpenParen,
                Token::Word("rel2par".into()),
                Token::Word("span".into()),
                Token::CloseParen,
                Token::OpenParen,
                Token::Word("text".into()),
                Token::Text("foo (bar)".into()),
                Token::CloseParen,
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_hs2015_labels_keep_colons() {
        assert_eq!(
            kinds("(satellite:same-unit"),
            vec![Token::OpenParen, Token::Word("satellite:same-unit".into())]
        );
    }

    #[test]
    fn test_call_style() {
        assert_eq!(
            kinds(r#"ParseTree('Elaboration[N][S]', ["didn't", 'b'])"#),
            vec![
                Token::Word("ParseTree".into()),
                Token::OpenParen,
                Token::Quoted("Elaboration[N][S]".into()),
                Token::Comma,
                Token::OpenBracket,
                Token::Quoted("didn't".into()),
                Token::Comma,
                Token::Quoted("b".into()),
                Token::CloseBracket,
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(kinds(r"'it\'s'"), vec![Token::Quoted("it's".into())]);
        assert_eq!(unescape(r"a\\b\nc\q"), "a\\b\nc\\q");
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("  (leaf 12)").unwrap();
        assert_eq!(tokens[0].1, 2..3);
        assert_eq!(tokens[2].1, 8..10);
    }

    #[test]
    fn test_is_word_matches_the_word_token() {
        for word in ["span", "same-unit", "Elaboration-additional", "cause:result", "_x"] {
            assert!(is_word(word), "{}", word);
            assert_eq!(kinds(word), vec![Token::Word(word.into())]);
        }
        for not_word in ["", "same unit", "Contrast!", "a(b", "it's", "x,y", "tab\there"] {
            assert!(!is_word(not_word), "{:?}", not_word);
        }
    }

    #[test]
    fn test_unterminated_text() {
        let err = tokenize("(text _!never closed").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("unterminated text span"));
        assert!(err.to_string().contains("(at byte 6)"));
    }
}
