use super::token::{Kind, KEYWORDS, SYMBOLS};
use super::Symbol;
use std::collections::HashMap;
use std::rc::Rc;

/// ## Interned lexemes
///
/// Every spelling the lexer produces is stored once and referred to by its
/// [`Symbol`], the index of first insertion. The pool is seeded with the
/// keywords in sorted order followed by the punctuation, so keyword
/// classification is a single lookup and entry `KEYWORD_COUNT` is the
/// first non-keyword.

pub const KEYWORD_COUNT: usize = KEYWORDS.len();

#[derive(Debug, Clone)]
pub struct Pool {
    lexemes: Vec<Rc<str>>,
    index: HashMap<Rc<str>, (Symbol, Kind)>,
}

impl Default for Pool {
    fn default() -> Pool {
        let mut pool = Pool {
            lexemes: Vec::new(),
            index: HashMap::new(),
        };
        for (spelling, kind) in KEYWORDS.iter().chain(SYMBOLS.iter()) {
            pool.insert(spelling, *kind);
        }
        pool
    }
}

impl Pool {
    pub fn new() -> Pool {
        Pool::default()
    }

    /// Classifies a word: keywords come back with their own kind, anything
    /// else is interned as an identifier.
    pub fn word(&mut self, spelling: &str) -> (Symbol, Kind) {
        match self.index.get(spelling) {
            Some(&entry) => entry,
            None => (self.insert(spelling, Kind::Identifier), Kind::Identifier),
        }
    }

    pub fn number(&mut self, spelling: &str) -> Symbol {
        match self.index.get(spelling) {
            Some(&(symbol, _)) => symbol,
            None => self.insert(spelling, Kind::Number),
        }
    }

    /// Symbol of an already seeded punctuation or keyword kind.
    pub fn symbol_of(&self, kind: Kind) -> Option<Symbol> {
        KEYWORDS
            .iter()
            .chain(SYMBOLS.iter())
            .position(|(_, k)| *k == kind)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.lexemes.get(symbol).map(|s| s.as_ref())
    }

    pub fn lookup(&self, spelling: &str) -> Option<Symbol> {
        self.index.get(spelling).map(|&(symbol, _)| symbol)
    }

    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lexemes.iter().map(|s| s.as_ref())
    }

    fn insert(&mut self, spelling: &str, kind: Kind) -> Symbol {
        let symbol = self.lexemes.len();
        let rc: Rc<str> = spelling.into();
        self.lexemes.push(rc.clone());
        self.index.insert(rc, (symbol, kind));
        symbol
    }
}
