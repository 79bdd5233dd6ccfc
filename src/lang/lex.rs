use super::{pool::Pool, token::*, Error, Line, Position, Symbol};
use crate::error;
use std::iter::Peekable;
use std::str::CharIndices;

type Result<T> = std::result::Result<T, Error>;

/// Lexes a whole source text, ending with the `EndOfInput` token.
pub fn lex(source: &str) -> Result<(Vec<Token>, Pool)> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token()?;
        tokens.push(token);
        if token.is(Kind::EndOfInput) {
            return Ok((tokens, lexer.into_pool()));
        }
    }
}

fn is_karel_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r')
}

fn is_karel_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_karel_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lazy token stream over source text. Words are classified through the
/// [`Pool`] it owns; the pool grows as new identifiers show up.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pool: Pool,
    line: Line,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer::with_pool(source, Pool::default())
    }

    pub fn with_pool(source: &'a str, pool: Pool) -> Lexer<'a> {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
            pool,
            line: 1,
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn into_pool(self) -> Pool {
        self.pool
    }

    /// Consumes zero or more characters and returns exactly one token.
    /// Keeps returning `EndOfInput` once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let next = self.chars.peek().copied();
            let (start, ch) = match next {
                Some(pair) => pair,
                None => return Ok(self.token(Kind::EndOfInput, None, self.source.len())),
            };
            if is_karel_whitespace(ch) {
                self.bump();
                continue;
            }
            if ch == '/' {
                self.comment(start)?;
                continue;
            }
            if ch.is_ascii_digit() {
                return Ok(self.number(start));
            }
            if is_karel_word_start(ch) {
                return Ok(self.word(start));
            }
            return self.punctuation(start, ch);
        }
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn offset(&mut self) -> Position {
        match self.chars.peek() {
            Some(&(offset, _)) => offset,
            None => self.source.len(),
        }
    }

    fn token(&self, kind: Kind, lexeme: Option<Symbol>, position: Position) -> Token {
        Token {
            kind,
            lexeme,
            position,
            line: self.line,
        }
    }

    fn comment(&mut self, start: Position) -> Result<()> {
        self.bump();
        match self.peek_char() {
            Some('/') => {
                while let Some(ch) = self.peek_char() {
                    if ch == '\n' {
                        break;
                    }
                    self.bump();
                }
                Ok(())
            }
            Some('*') => {
                self.bump();
                let mut star = false;
                while let Some(ch) = self.bump() {
                    if star && ch == '/' {
                        return Ok(());
                    }
                    star = ch == '*';
                }
                Err(error!(SyntaxError, start; "unclosed comment"))
            }
            _ => Err(error!(IllegalCharacter, start; "comments start with // or /*")),
        }
    }

    fn number(&mut self, start: Position) -> Token {
        let line = self.line;
        while let Some(ch) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.bump();
        }
        let end = self.offset();
        let symbol = self.pool.number(&self.source[start..end]);
        Token {
            kind: Kind::Number,
            lexeme: Some(symbol),
            position: start,
            line,
        }
    }

    fn word(&mut self, start: Position) -> Token {
        let line = self.line;
        while let Some(ch) = self.peek_char() {
            if !is_karel_word(ch) {
                break;
            }
            self.bump();
        }
        let end = self.offset();
        let (symbol, kind) = self.pool.word(&self.source[start..end]);
        Token {
            kind,
            lexeme: Some(symbol),
            position: start,
            line,
        }
    }

    fn punctuation(&mut self, start: Position, ch: char) -> Result<Token> {
        self.bump();
        let kind = match ch {
            '(' => Kind::OpeningParen,
            ')' => Kind::ClosingParen,
            ';' => Kind::Semicolon,
            '{' => Kind::OpeningBrace,
            '}' => Kind::ClosingBrace,
            '!' => Kind::Bang,
            '&' => {
                if self.peek_char() != Some('&') {
                    return Err(error!(IllegalCharacter, start; "logical and is &&"));
                }
                self.bump();
                Kind::AmpersandAmpersand
            }
            '|' => {
                if self.peek_char() != Some('|') {
                    return Err(error!(IllegalCharacter, start; "logical or is ||"));
                }
                self.bump();
                Kind::BarBar
            }
            _ => {
                return Err(error!(IllegalCharacter, start; format!("illegal character {}", ch)))
            }
        };
        Ok(self.token(kind, self.pool.symbol_of(kind), start))
    }
}
