use super::Position;

/// A compile-time diagnostic. Compilation stops at the first one.
#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    position: Position,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $pos:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at($pos)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $pos:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at($pos)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            position: 0,
            message: String::new(),
        }
    }

    pub fn at(self, position: Position) -> Error {
        Error { position, ..self }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Byte offset into the source text.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// 1-based line and column of the position within `source`.
    pub fn line_and_column(&self, source: &str) -> (usize, usize) {
        let end = self.position.min(source.len());
        let before = source.get(..end).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    IllegalCharacter,
    SyntaxError,
    OutOfRange,
    UndefinedCommand,
    DuplicateCommand,
    OutOfMemory,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            IllegalCharacter => "LEXICAL ERROR",
            SyntaxError => "SYNTAX ERROR",
            OutOfRange => "RANGE ERROR",
            UndefinedCommand => "UNDEFINED COMMAND",
            DuplicateCommand => "DUPLICATE COMMAND",
            OutOfMemory => "OUT OF MEMORY",
        };
        if self.message.is_empty() {
            write!(f, "{} AT {}", code_str, self.position)
        } else {
            write!(f, "{} AT {}; {}", code_str, self.position, self.message)
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_message() {
        let e = error!(SyntaxError, 12; "expected (");
        assert_eq!(e.to_string(), "SYNTAX ERROR AT 12; expected (");
        assert_eq!(e.text(), "expected (");
    }

    #[test]
    fn test_line_and_column() {
        let source = "void main() {\n  123\n}\n";
        let e = error!(SyntaxError, 16);
        assert_eq!(e.line_and_column(source), (2, 3));
        let e = error!(SyntaxError, 0);
        assert_eq!(e.line_and_column(source), (1, 1));
    }
}
