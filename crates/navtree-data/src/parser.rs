//! Parser for navigation data files.
//!
//! A file is a sequence of `var NAME = value;` declarations where each
//! value is a string, `null`, or a nested array. The declarations the
//! format defines are interpreted into a [`NavTreeData`]; unknown ones
//! are tolerated and reported as warnings so files from newer generator
//! versions still load.

use navtree_model::{AnchorIndex, NavTreeBuilder, NavTreeData, SyncMessages};
use tracing::warn;

use crate::error::ParseError;
use crate::lexer::{self, SpannedToken, Token};

/// A parsed document together with non-fatal findings.
#[derive(Debug)]
pub struct Parsed {
    /// The interpreted document.
    pub data: NavTreeData,
    /// Tolerated oddities, e.g. unknown declarations.
    pub warnings: Vec<String>,
}

/// Parse the text of a navigation data file.
///
/// # Errors
///
/// Returns [`ParseError`] on malformed syntax, on entries that are not
/// `[label, link, children]` tuples, on empty children lists, on index
/// entries that are not valid anchor references, and when `NAVTREE` or
/// `NAVTREEINDEX` is missing.
pub fn parse(input: &str) -> Result<Parsed, ParseError> {
    let lexed = lexer::lex(input)?;
    let mut parser = Parser {
        tokens: lexed.tokens,
        pos: 0,
    };

    let declarations = parser.declarations()?;
    interpret(lexed.license, declarations)
}

/// A literal value with its source position.
#[derive(Debug)]
struct Value {
    kind: ValueKind,
    line: u32,
    column: u32,
}

#[derive(Debug)]
enum ValueKind {
    Str(String),
    Null,
    Array(Vec<Value>),
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<SpannedToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &'static str, want: &Token) -> Result<(), ParseError> {
        match self.bump() {
            Some(spanned) if spanned.token == *want => Ok(()),
            Some(spanned) => Err(ParseError::UnexpectedToken {
                line: spanned.line,
                column: spanned.column,
                expected,
                found: spanned.token.describe(),
            }),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    /// Parse the whole token stream as `var NAME = value;` declarations.
    fn declarations(&mut self) -> Result<Vec<(String, Value)>, ParseError> {
        let mut declarations = Vec::new();
        while self.peek().is_some() {
            self.expect("`var`", &Token::Var)?;
            let name = match self.bump() {
                Some(SpannedToken {
                    token: Token::Ident(name),
                    ..
                }) => name,
                Some(spanned) => {
                    return Err(ParseError::UnexpectedToken {
                        line: spanned.line,
                        column: spanned.column,
                        expected: "declaration name",
                        found: spanned.token.describe(),
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "declaration name",
                    });
                }
            };
            self.expect("`=`", &Token::Eq)?;
            let value = self.value()?;
            self.expect("`;`", &Token::Semi)?;
            declarations.push((name, value));
        }
        Ok(declarations)
    }

    /// Parse one value: a string, `null`, or an array.
    fn value(&mut self) -> Result<Value, ParseError> {
        let spanned = self.bump().ok_or(ParseError::UnexpectedEnd {
            expected: "a value",
        })?;
        let (line, column) = (spanned.line, spanned.column);

        let kind = match spanned.token {
            Token::Str(s) => ValueKind::Str(s),
            Token::Null => ValueKind::Null,
            Token::LBracket => ValueKind::Array(self.array_elements()?),
            other => {
                return Err(ParseError::UnexpectedToken {
                    line,
                    column,
                    expected: "a value",
                    found: other.describe(),
                });
            }
        };

        Ok(Value { kind, line, column })
    }

    /// Parse comma-separated values up to the closing `]`.
    fn array_elements(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut elements = Vec::new();

        if matches!(self.peek(), Some(t) if t.token == Token::RBracket) {
            self.bump();
            return Ok(elements);
        }

        loop {
            elements.push(self.value()?);
            match self.bump() {
                Some(t) if t.token == Token::Comma => {}
                Some(t) if t.token == Token::RBracket => return Ok(elements),
                Some(spanned) => {
                    return Err(ParseError::UnexpectedToken {
                        line: spanned.line,
                        column: spanned.column,
                        expected: "`,` or `]`",
                        found: spanned.token.describe(),
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "`,` or `]`",
                    });
                }
            }
        }
    }
}

/// Turn raw declarations into a [`NavTreeData`].
fn interpret(
    license: Option<String>,
    declarations: Vec<(String, Value)>,
) -> Result<Parsed, ParseError> {
    let mut warnings = Vec::new();
    let mut navtree = None;
    let mut navtreeindex = None;
    let mut sync_on = None;
    let mut sync_off = None;

    for (name, value) in declarations {
        let slot = match name.as_str() {
            "NAVTREE" => &mut navtree,
            "NAVTREEINDEX" => &mut navtreeindex,
            "SYNCONMSG" => &mut sync_on,
            "SYNCOFFMSG" => &mut sync_off,
            _ => {
                let message =
                    format!("line {}: ignoring unknown declaration `{name}`", value.line);
                warn!("{message}");
                warnings.push(message);
                continue;
            }
        };
        if slot.is_some() {
            let message = format!(
                "line {}: duplicate declaration `{name}` replaces the earlier one",
                value.line
            );
            warn!("{message}");
            warnings.push(message);
        }
        *slot = Some(value);
    }

    let tree = build_tree(navtree.ok_or(ParseError::MissingDeclaration("NAVTREE"))?)?;
    let index = build_index(navtreeindex.ok_or(ParseError::MissingDeclaration("NAVTREEINDEX"))?)?;

    let defaults = SyncMessages::default();
    let messages = SyncMessages {
        sync_on: match sync_on {
            Some(value) => expect_string(value, "SYNCONMSG")?,
            None => defaults.sync_on,
        },
        sync_off: match sync_off {
            Some(value) => expect_string(value, "SYNCOFFMSG")?,
            None => defaults.sync_off,
        },
    };

    let mut data = NavTreeData::new(tree, index);
    data.license = license;
    data.messages = messages;

    Ok(Parsed { data, warnings })
}

fn expect_string(value: Value, name: &str) -> Result<String, ParseError> {
    match value.kind {
        ValueKind::Str(s) => Ok(s),
        _ => Err(ParseError::WrongType {
            line: value.line,
            column: value.column,
            name: name.to_owned(),
            expected: "a string",
        }),
    }
}

fn build_tree(value: Value) -> Result<navtree_model::NavTree, ParseError> {
    let ValueKind::Array(entries) = value.kind else {
        return Err(ParseError::WrongType {
            line: value.line,
            column: value.column,
            name: "NAVTREE".to_owned(),
            expected: "an array",
        });
    };

    let mut builder = NavTreeBuilder::new();
    for entry in entries {
        build_node(&mut builder, entry, None)?;
    }
    Ok(builder.build())
}

/// Interpret one `[label, link, children]` tuple, recursing into
/// in-file children.
fn build_node(
    builder: &mut NavTreeBuilder,
    entry: Value,
    parent: Option<usize>,
) -> Result<(), ParseError> {
    let (line, column) = (entry.line, entry.column);
    let ValueKind::Array(parts) = entry.kind else {
        return Err(ParseError::MalformedEntry { line, column });
    };
    let Ok([label, link, third]) = <[Value; 3]>::try_from(parts) else {
        return Err(ParseError::MalformedEntry { line, column });
    };

    let ValueKind::Str(label) = label.kind else {
        return Err(ParseError::MalformedEntry { line, column });
    };
    let link = match link.kind {
        ValueKind::Str(s) => Some(s),
        ValueKind::Null => None,
        ValueKind::Array(_) => return Err(ParseError::MalformedEntry { line, column }),
    };

    match third.kind {
        ValueKind::Null => {
            builder.add_node(label, link, parent);
        }
        ValueKind::Str(reference) => {
            builder.add_subtree_ref(label, link, reference, parent);
        }
        ValueKind::Array(children) => {
            if children.is_empty() {
                return Err(ParseError::EmptyChildren {
                    line: third.line,
                    column: third.column,
                });
            }
            let idx = builder.add_node(label, link, parent);
            for child in children {
                build_node(builder, child, Some(idx))?;
            }
        }
    }
    Ok(())
}

fn build_index(value: Value) -> Result<AnchorIndex, ParseError> {
    let ValueKind::Array(entries) = value.kind else {
        return Err(ParseError::WrongType {
            line: value.line,
            column: value.column,
            name: "NAVTREEINDEX".to_owned(),
            expected: "an array",
        });
    };

    let mut index = AnchorIndex::new();
    for entry in entries {
        let (line, column) = (entry.line, entry.column);
        let ValueKind::Str(s) = entry.kind else {
            return Err(ParseError::WrongType {
                line,
                column,
                name: "NAVTREEINDEX entry".to_owned(),
                expected: "a string",
            });
        };
        let anchor = s
            .parse()
            .map_err(|source| ParseError::InvalidAnchor {
                line,
                column,
                source,
            })?;
        index.push(anchor);
    }
    Ok(index)
}
