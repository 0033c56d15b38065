//! Tokenizer for the JavaScript-literal subset of navigation data files.
//!
//! The generator emits a small, fixed grammar: `var` declarations bound
//! to strings, `null`, and nested arrays, with `/* */` and `//`
//! comments. The first block comment before any token is the license
//! header and is captured verbatim; all other comments are skipped.

use crate::error::ParseError;

/// One lexical token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// The `var` keyword.
    Var,
    /// The `null` keyword.
    Null,
    /// A declaration name.
    Ident(String),
    /// A string literal, with escapes resolved.
    Str(String),
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `=`
    Eq,
    /// `;`
    Semi,
}

impl Token {
    /// Short description for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Var => "`var`".to_owned(),
            Self::Null => "`null`".to_owned(),
            Self::Ident(name) => format!("identifier `{name}`"),
            Self::Str(_) => "string literal".to_owned(),
            Self::LBracket => "`[`".to_owned(),
            Self::RBracket => "`]`".to_owned(),
            Self::Comma => "`,`".to_owned(),
            Self::Eq => "`=`".to_owned(),
            Self::Semi => "`;`".to_owned(),
        }
    }
}

/// A token with its 1-based source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SpannedToken {
    pub(crate) token: Token,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

/// Result of tokenizing a whole file.
#[derive(Debug)]
pub(crate) struct Lexed {
    /// License header comment, verbatim including delimiters.
    pub(crate) license: Option<String>,
    pub(crate) tokens: Vec<SpannedToken>,
}

/// Tokenize a navigation data file.
pub(crate) fn lex(input: &str) -> Result<Lexed, ParseError> {
    let mut lexer = Lexer::new(input);
    lexer.run()?;
    Ok(Lexed {
        license: lexer.license,
        tokens: lexer.tokens,
    })
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    license: Option<String>,
    tokens: Vec<SpannedToken>,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            license: None,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn push(&mut self, token: Token, line: u32, column: u32) {
        self.tokens.push(SpannedToken {
            token,
            line,
            column,
        });
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            let (line, column) = (self.line, self.column);
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek_next() == Some('*') => {
                    let comment = self.block_comment(line, column)?;
                    // Only the header position gets captured as a license
                    if self.license.is_none() && self.tokens.is_empty() {
                        self.license = Some(comment);
                    }
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                '"' | '\'' => {
                    let value = self.string(c, line, column)?;
                    self.push(Token::Str(value), line, column);
                }
                '[' => {
                    self.bump();
                    self.push(Token::LBracket, line, column);
                }
                ']' => {
                    self.bump();
                    self.push(Token::RBracket, line, column);
                }
                ',' => {
                    self.bump();
                    self.push(Token::Comma, line, column);
                }
                '=' => {
                    self.bump();
                    self.push(Token::Eq, line, column);
                }
                ';' => {
                    self.bump();
                    self.push(Token::Semi, line, column);
                }
                c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                    let word = self.word();
                    let token = match word.as_str() {
                        "var" => Token::Var,
                        "null" => Token::Null,
                        _ => Token::Ident(word),
                    };
                    self.push(token, line, column);
                }
                found => {
                    return Err(ParseError::UnexpectedChar {
                        line,
                        column,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    /// Consume a `/* ... */` comment, returning it verbatim.
    fn block_comment(&mut self, line: u32, column: u32) -> Result<String, ParseError> {
        let mut raw = String::new();
        // Opening "/*"
        raw.push(self.bump().unwrap_or_default());
        raw.push(self.bump().unwrap_or_default());

        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    raw.push_str("*/");
                    return Ok(raw);
                }
                Some(c) => raw.push(c),
                None => return Err(ParseError::UnterminatedComment { line, column }),
            }
        }
    }

    /// Consume a quoted string literal, resolving escapes.
    fn string(&mut self, quote: char, line: u32, column: u32) -> Result<String, ParseError> {
        self.bump();
        let mut value = String::new();

        loop {
            let (esc_line, esc_column) = (self.line, self.column);
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    let escaped = self
                        .bump()
                        .ok_or(ParseError::UnterminatedString { line, column })?;
                    match escaped {
                        '\\' | '\'' | '"' => value.push(escaped),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        '0' => value.push('\0'),
                        'u' => value.push(self.unicode_escape(esc_line, esc_column)?),
                        found => {
                            return Err(ParseError::InvalidEscape {
                                line: esc_line,
                                column: esc_column,
                                found,
                            });
                        }
                    }
                }
                Some('\n') | None => {
                    return Err(ParseError::UnterminatedString { line, column });
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Consume the four hex digits of a `\uXXXX` escape.
    fn unicode_escape(&mut self, line: u32, column: u32) -> Result<char, ParseError> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            let c = self.bump().ok_or(ParseError::InvalidEscape {
                line,
                column,
                found: 'u',
            })?;
            digits.push(c);
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or(ParseError::InvalidEscape {
                line,
                column,
                found: 'u',
            })
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input)
            .unwrap()
            .tokens
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_lex_declaration() {
        let lexed = tokens(r#"var SYNCONMSG = 'click';"#);

        assert_eq!(
            lexed,
            vec![
                Token::Var,
                Token::Ident("SYNCONMSG".to_owned()),
                Token::Eq,
                Token::Str("click".to_owned()),
                Token::Semi,
            ]
        );
    }

    #[test]
    fn test_lex_array_and_null() {
        let lexed = tokens(r#"[ "a", null ]"#);

        assert_eq!(
            lexed,
            vec![
                Token::LBracket,
                Token::Str("a".to_owned()),
                Token::Comma,
                Token::Null,
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_lex_positions_are_one_based() {
        let lexed = lex("var X =\n[];").unwrap();

        assert_eq!((lexed.tokens[0].line, lexed.tokens[0].column), (1, 1));
        assert_eq!((lexed.tokens[1].line, lexed.tokens[1].column), (1, 5));
        assert_eq!((lexed.tokens[3].line, lexed.tokens[3].column), (2, 1));
    }

    #[test]
    fn test_lex_captures_leading_block_comment_as_license() {
        let lexed = lex("/*\n MIT\n*/\nvar X = null;").unwrap();

        assert_eq!(lexed.license.as_deref(), Some("/*\n MIT\n*/"));
    }

    #[test]
    fn test_lex_later_comments_are_skipped() {
        let lexed = lex("var X = null; /* not a license */").unwrap();

        assert_eq!(lexed.license, None);
        assert_eq!(lexed.tokens.len(), 5);
    }

    #[test]
    fn test_lex_line_comment_skipped() {
        let lexed = tokens("// generated\nvar X = null;");

        assert_eq!(lexed[0], Token::Var);
    }

    #[test]
    fn test_lex_string_escapes() {
        let lexed = tokens(r#""a\\b\"c\n" 'A'"#);

        assert_eq!(
            lexed,
            vec![
                Token::Str("a\\b\"c\n".to_owned()),
                Token::Str("A".to_owned()),
            ]
        );
    }

    #[test]
    fn test_lex_invalid_escape() {
        let err = lex(r#""a\qb""#).unwrap_err();

        assert_eq!(
            err,
            ParseError::InvalidEscape {
                line: 1,
                column: 3,
                found: 'q'
            }
        );
    }

    #[test]
    fn test_lex_unterminated_string() {
        let err = lex("var X = \"open").unwrap_err();

        assert_eq!(
            err,
            ParseError::UnterminatedString { line: 1, column: 9 }
        );
    }

    #[test]
    fn test_lex_string_may_not_span_lines() {
        assert!(matches!(
            lex("\"a\nb\"").unwrap_err(),
            ParseError::UnterminatedString { .. }
        ));
    }

    #[test]
    fn test_lex_unterminated_comment() {
        let err = lex("/* open").unwrap_err();

        assert_eq!(
            err,
            ParseError::UnterminatedComment { line: 1, column: 1 }
        );
    }

    #[test]
    fn test_lex_unexpected_character() {
        let err = lex("var X = {};").unwrap_err();

        assert_eq!(
            err,
            ParseError::UnexpectedChar {
                line: 1,
                column: 9,
                found: '{'
            }
        );
    }
}
