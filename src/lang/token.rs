use super::{Line, Position, Symbol};

/// Reserved words, sorted. The lexeme pool is seeded in this order.
pub const KEYWORDS: [(&str, Kind); 5] = [
    ("else", Kind::Else),
    ("if", Kind::If),
    ("repeat", Kind::Repeat),
    ("void", Kind::Void),
    ("while", Kind::While),
];

/// Punctuation spellings, seeded into the pool right after the keywords.
pub const SYMBOLS: [(&str, Kind); 8] = [
    ("!", Kind::Bang),
    ("&&", Kind::AmpersandAmpersand),
    ("(", Kind::OpeningParen),
    (")", Kind::ClosingParen),
    (";", Kind::Semicolon),
    ("{", Kind::OpeningBrace),
    ("||", Kind::BarBar),
    ("}", Kind::ClosingBrace),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Identifier,

    Else,
    If,
    Repeat,
    Void,
    While,

    Bang,
    AmpersandAmpersand,
    OpeningParen,
    ClosingParen,
    Semicolon,
    OpeningBrace,
    BarBar,
    ClosingBrace,

    EndOfInput,
}

impl Kind {
    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Kind::*;
        match self {
            Number => write!(f, "number"),
            Identifier => write!(f, "identifier"),
            EndOfInput => write!(f, "end of input"),
            kind => {
                let spelling = KEYWORDS
                    .iter()
                    .chain(SYMBOLS.iter())
                    .find(|(_, k)| k == kind)
                    .map(|(s, _)| *s)
                    .unwrap_or("?");
                write!(f, "{}", spelling)
            }
        }
    }
}

/// A classified lexeme. Tokens are plain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub lexeme: Option<Symbol>,
    pub position: Position,
    pub line: Line,
}

impl Token {
    pub fn is(&self, kind: Kind) -> bool {
        self.kind == kind
    }
}
