//! Tokenizer for JSON extended with `//` and `/* */` comments

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Str,
    Number,
    True,
    False,
    Null,
    LineComment,
    BlockComment,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw lexeme; for comments, the text between the delimiters
    pub text: String,
    /// 1-based line the token starts on
    pub line: usize,
    /// 1-based column the token starts at
    pub column: usize,
    /// Whether a line break separates this token from the previous one
    pub on_new_line: bool,
}

pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    newline_pending: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            newline_pending: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                }
                '{' => self.punct(TokenKind::LBrace),
                '}' => self.punct(TokenKind::RBrace),
                '[' => self.punct(TokenKind::LBracket),
                ']' => self.punct(TokenKind::RBracket),
                ':' => self.punct(TokenKind::Colon),
                ',' => self.punct(TokenKind::Comma),
                '"' => self.string()?,
                '/' => self.comment()?,
                '-' | '0'..='9' => self.number()?,
                't' | 'f' | 'n' => self.keyword()?,
                other => {
                    return Err(Error::syntax(
                        self.line,
                        self.column,
                        format!("unexpected character {other:?}"),
                    ));
                }
            }
        }
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.newline_pending = true;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Position and newline separation at the start of a token
    fn token_start(&mut self) -> (usize, usize, bool) {
        (
            self.line,
            self.column,
            std::mem::take(&mut self.newline_pending),
        )
    }

    fn push(&mut self, kind: TokenKind, text: String, start: (usize, usize, bool)) {
        let (line, column, on_new_line) = start;
        self.tokens.push(Token {
            kind,
            text,
            line,
            column,
            on_new_line,
        });
    }

    fn punct(&mut self, kind: TokenKind) {
        let start = self.token_start();
        if let Some(c) = self.bump() {
            self.push(kind, c.to_string(), start);
        }
    }

    fn string(&mut self) -> Result<()> {
        let start = self.token_start();
        let from = self.pos;
        self.bump();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(Error::syntax(start.0, start.1, "unterminated string"));
                }
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {}
                    Some('u') => {
                        for _ in 0..4 {
                            match self.bump() {
                                Some(c) if c.is_ascii_hexdigit() => {}
                                _ => {
                                    return Err(Error::syntax(
                                        start.0,
                                        start.1,
                                        "invalid \\u escape",
                                    ));
                                }
                            }
                        }
                    }
                    Some(other) => {
                        return Err(Error::syntax(
                            start.0,
                            start.1,
                            format!("invalid escape character {other:?}"),
                        ));
                    }
                    None => {
                        return Err(Error::syntax(start.0, start.1, "unterminated string"));
                    }
                },
                Some(_) => {}
            }
        }
        self.push(TokenKind::Str, self.source[from..self.pos].to_string(), start);
        Ok(())
    }

    fn number(&mut self) -> Result<()> {
        let start = self.token_start();
        let from = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        if self.eat_digits() == 0 {
            return Err(Error::syntax(start.0, start.1, "invalid number"));
        }
        if self.peek() == Some('.') {
            self.bump();
            if self.eat_digits() == 0 {
                return Err(Error::syntax(start.0, start.1, "invalid number"));
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.eat_digits() == 0 {
                return Err(Error::syntax(start.0, start.1, "invalid number"));
            }
        }
        self.push(
            TokenKind::Number,
            self.source[from..self.pos].to_string(),
            start,
        );
        Ok(())
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
            count += 1;
        }
        count
    }

    fn keyword(&mut self) -> Result<()> {
        let start = self.token_start();
        let rest = &self.source[self.pos..];
        let (kind, text) = if rest.starts_with("true") {
            (TokenKind::True, "true")
        } else if rest.starts_with("false") {
            (TokenKind::False, "false")
        } else if rest.starts_with("null") {
            (TokenKind::Null, "null")
        } else {
            return Err(Error::syntax(start.0, start.1, "unexpected token"));
        };
        for _ in 0..text.len() {
            self.bump();
        }
        self.push(kind, text.to_string(), start);
        Ok(())
    }

    fn comment(&mut self) -> Result<()> {
        let start = self.token_start();
        self.bump();
        match self.peek() {
            Some('/') => {
                self.bump();
                let from = self.pos;
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
                self.push(
                    TokenKind::LineComment,
                    self.source[from..self.pos].to_string(),
                    start,
                );
                Ok(())
            }
            Some('*') => {
                self.bump();
                let from = self.pos;
                loop {
                    let Some(c) = self.bump() else {
                        return Err(Error::syntax(start.0, start.1, "unterminated block comment"));
                    };
                    if c == '*' && self.peek() == Some('/') {
                        let to = self.pos - 1;
                        self.bump();
                        self.push(
                            TokenKind::BlockComment,
                            self.source[from..to].to_string(),
                            start,
                        );
                        return Ok(());
                    }
                }
            }
            _ => Err(Error::syntax(start.0, start.1, "expected '//' or '/*'")),
        }
    }
}
