//! Recursive-descent parser producing the comment-anchored tree

use crate::error::{Error, Result};
use crate::json::lexer::{Token, TokenKind, tokenize};
use crate::json::value::{
    Anchor, AnchoredComment, Array, Comment, CommentKind, Entry, JsonDocument, Object, Value,
};

/// Parse JSON-with-comments source into a document tree
pub fn parse(source: &str) -> Result<JsonDocument> {
    let tokens = tokenize(source)?;
    Parser { tokens, pos: 0 }.document()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eof(&self) -> Error {
        match self.tokens.last() {
            Some(token) => Error::syntax(token.line, token.column, "unexpected end of input"),
            None => Error::syntax(1, 1, "unexpected end of input"),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<()> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(unexpected(token, expected)),
            None => Err(self.eof()),
        }
    }

    fn document(&mut self) -> Result<JsonDocument> {
        let leading = self.take_comments();
        let root = self.value()?;
        let trailing = self.take_comments();
        if let Some(token) = self.peek() {
            return Err(unexpected(token, "end of input"));
        }
        Ok(JsonDocument {
            leading,
            root,
            trailing,
        })
    }

    fn value(&mut self) -> Result<Value> {
        let Some(token) = self.peek() else {
            return Err(self.eof());
        };
        match token.kind {
            TokenKind::LBrace => self.object(),
            TokenKind::LBracket => self.array(),
            TokenKind::Str => {
                let Some(token) = self.advance() else {
                    return Err(self.eof());
                };
                Ok(Value::Str(token.text))
            }
            TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null => {
                let Some(token) = self.advance() else {
                    return Err(self.eof());
                };
                Ok(Value::Literal(token.text))
            }
            _ => Err(unexpected(token, "a value")),
        }
    }

    fn object(&mut self) -> Result<Value> {
        self.advance();
        let mut object = Object::default();
        let mut pending: Vec<Comment> = Vec::new();
        let mut separated = true;

        loop {
            let Some(token) = self.peek() else {
                return Err(self.eof());
            };
            match token.kind {
                TokenKind::LineComment | TokenKind::BlockComment => {
                    if let Some(comment) = self.take_comment() {
                        stash_comment(
                            comment,
                            &mut pending,
                            &mut object.comments,
                            object.entries.len(),
                        );
                    }
                }
                TokenKind::RBrace => {
                    if separated && !object.entries.is_empty() {
                        return Err(unexpected(token, "a key"));
                    }
                    flush_pending(
                        &mut pending,
                        &mut object.comments,
                        close_anchor(object.entries.len()),
                    );
                    self.advance();
                    return Ok(Value::Object(object));
                }
                TokenKind::Comma => {
                    if separated {
                        return Err(unexpected(token, "a key"));
                    }
                    separated = true;
                    self.advance();
                }
                TokenKind::Str => {
                    if !separated {
                        return Err(unexpected(token, "',' or '}'"));
                    }
                    let index = object.entries.len();
                    flush_pending(&mut pending, &mut object.comments, Anchor::Before(index));
                    let Some(key_token) = self.advance() else {
                        return Err(self.eof());
                    };
                    self.attach_before(&mut object.comments, index);
                    self.expect(TokenKind::Colon, "':'")?;
                    self.attach_before(&mut object.comments, index);
                    let value = self.value()?;
                    object.entries.push(Entry {
                        key: key_token.text,
                        value,
                    });
                    separated = false;
                }
                _ => return Err(unexpected(token, "a key")),
            }
        }
    }

    fn array(&mut self) -> Result<Value> {
        self.advance();
        let mut array = Array::default();
        let mut pending: Vec<Comment> = Vec::new();
        let mut separated = true;

        loop {
            let Some(token) = self.peek() else {
                return Err(self.eof());
            };
            match token.kind {
                TokenKind::LineComment | TokenKind::BlockComment => {
                    if let Some(comment) = self.take_comment() {
                        stash_comment(
                            comment,
                            &mut pending,
                            &mut array.comments,
                            array.items.len(),
                        );
                    }
                }
                TokenKind::RBracket => {
                    if separated && !array.items.is_empty() {
                        return Err(unexpected(token, "a value"));
                    }
                    flush_pending(
                        &mut pending,
                        &mut array.comments,
                        close_anchor(array.items.len()),
                    );
                    self.advance();
                    return Ok(Value::Array(array));
                }
                TokenKind::Comma => {
                    if separated {
                        return Err(unexpected(token, "a value"));
                    }
                    separated = true;
                    self.advance();
                }
                _ => {
                    if !separated {
                        return Err(unexpected(token, "',' or ']'"));
                    }
                    flush_pending(
                        &mut pending,
                        &mut array.comments,
                        Anchor::Before(array.items.len()),
                    );
                    let value = self.value()?;
                    array.items.push(value);
                    separated = false;
                }
            }
        }
    }

    /// Consume one comment token, noting whether it shared a line with the
    /// token before it
    fn take_comment(&mut self) -> Option<Comment> {
        let is_comment = matches!(
            self.peek().map(|token| token.kind),
            Some(TokenKind::LineComment | TokenKind::BlockComment)
        );
        if !is_comment {
            return None;
        }
        self.advance().map(|token| Comment {
            kind: comment_kind(token.kind),
            text: token.text,
            inline: !token.on_new_line,
        })
    }

    /// Consume consecutive comments as own-line comments
    fn take_comments(&mut self) -> Vec<Comment> {
        let mut comments = Vec::new();
        while let Some(comment) = self.take_comment() {
            comments.push(Comment {
                inline: false,
                ..comment
            });
        }
        comments
    }

    /// Attach any comments sitting between a key and its value to the
    /// entry's before-position
    fn attach_before(&mut self, comments: &mut Vec<AnchoredComment>, index: usize) {
        for comment in self.take_comments() {
            comments.push(AnchoredComment {
                anchor: Anchor::Before(index),
                comment,
            });
        }
    }
}

/// Inline comments stick to the previous child; everything else waits for
/// the next child (or the container end) to pick an anchor.
fn stash_comment(
    comment: Comment,
    pending: &mut Vec<Comment>,
    comments: &mut Vec<AnchoredComment>,
    children: usize,
) {
    if comment.inline && children > 0 && pending.is_empty() {
        comments.push(AnchoredComment {
            anchor: Anchor::After(children - 1),
            comment,
        });
    } else {
        pending.push(Comment {
            inline: false,
            ..comment
        });
    }
}

fn flush_pending(pending: &mut Vec<Comment>, comments: &mut Vec<AnchoredComment>, anchor: Anchor) {
    for comment in pending.drain(..) {
        comments.push(AnchoredComment { anchor, comment });
    }
}

fn close_anchor(children: usize) -> Anchor {
    if children == 0 {
        Anchor::Leading
    } else {
        Anchor::After(children - 1)
    }
}

fn comment_kind(kind: TokenKind) -> CommentKind {
    match kind {
        TokenKind::BlockComment => CommentKind::Block,
        _ => CommentKind::Line,
    }
}

fn unexpected(token: &Token, expected: &str) -> Error {
    Error::syntax(
        token.line,
        token.column,
        format!("expected {expected}, found {}", describe(token.kind)),
    )
}

fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::LBrace => "'{'",
        TokenKind::RBrace => "'}'",
        TokenKind::LBracket => "'['",
        TokenKind::RBracket => "']'",
        TokenKind::Colon => "':'",
        TokenKind::Comma => "','",
        TokenKind::Str => "a string",
        TokenKind::Number => "a number",
        TokenKind::True | TokenKind::False => "a boolean",
        TokenKind::Null => "null",
        TokenKind::LineComment | TokenKind::BlockComment => "a comment",
    }
}
