// Reader for parenthesized definition records.
// Turns source text into nested lists of atoms, strings and numbers.
// Knows nothing about what the records mean.

use std::fmt;

/// A node of the record tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Bare symbol such as `object` or `const-gchar*`.
    Atom(String),
    /// Quoted string literal, quotes removed.
    Str(String),
    /// Numeric literal; `lexeme` keeps the source spelling so values
    /// outside `f64`'s exact range are rendered unchanged.
    Number { value: f64, lexeme: String },
    List(Vec<Record>),
}

impl Record {
    /// Text of an atom or string literal.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Record::Atom(s) | Record::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Record::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Record]> {
        match self {
            Record::List(items) => Some(items),
            _ => None,
        }
    }

    /// Leading keyword of a list record.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_text()
    }

    /// Scalar value as written in the source.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Record::Atom(s) | Record::Str(s) => Some(s.clone()),
            Record::Number { lexeme, .. } => Some(lexeme.clone()),
            Record::List(_) => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Atom(s) => write!(f, "{s}"),
            Record::Str(s) => write!(f, "\"{s}\""),
            Record::Number { lexeme, .. } => write!(f, "{lexeme}"),
            Record::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Structural problems found while reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("{line}:{column}: unmatched ')'")]
    UnmatchedClose { line: usize, column: usize },

    #[error("{line}:{column}: unmatched parentheses, {depth} list(s) still open at end of input")]
    UnclosedList { depth: usize, line: usize, column: usize },

    #[error("{line}:{column}: unterminated string literal")]
    UnterminatedString { line: usize, column: usize },
}

/// A `ReadError` tagged with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error in {file}:{source}")]
pub struct ParseError {
    pub file: String,
    pub source: ReadError,
}

#[derive(Debug, Clone, Copy)]
struct Location {
    line: usize,
    column: usize,
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn starts_number(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-' | '.') => self.peek_second().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn read(mut self) -> Result<Vec<Record>, ReadError> {
        let mut root = Vec::new();
        // Lists still open, innermost last, with where they were opened.
        let mut open: Vec<(Vec<Record>, Location)> = Vec::new();

        while let Some(c) = self.peek() {
            let record = match c {
                c if c.is_whitespace() => {
                    self.bump();
                    continue;
                }
                '(' => {
                    let at = self.location();
                    self.bump();
                    open.push((Vec::new(), at));
                    continue;
                }
                ')' => {
                    let at = self.location();
                    self.bump();
                    match open.pop() {
                        Some((items, _)) => Record::List(items),
                        None => {
                            return Err(ReadError::UnmatchedClose {
                                line: at.line,
                                column: at.column,
                            });
                        }
                    }
                }
                '"' => {
                    let at = self.location();
                    self.bump();
                    let text = self.eat_while(|c| c != '"');
                    if self.bump().is_none() {
                        return Err(ReadError::UnterminatedString {
                            line: at.line,
                            column: at.column,
                        });
                    }
                    Record::Str(text.to_string())
                }
                ';' => {
                    self.eat_while(|c| c != '\n');
                    continue;
                }
                _ if self.starts_number() => {
                    let token = self.eat_while(is_numeric_char);
                    match token.parse::<f64>() {
                        Ok(value) => Record::Number {
                            value,
                            lexeme: token.to_string(),
                        },
                        Err(_) => Record::Atom(token.to_string()),
                    }
                }
                _ => {
                    let token = self.eat_while(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | ';'));
                    Record::Atom(token.to_string())
                }
            };

            match open.last_mut() {
                Some((items, _)) => items.push(record),
                None => root.push(record),
            }
        }

        if let Some((_, at)) = open.last() {
            return Err(ReadError::UnclosedList {
                depth: open.len(),
                line: at.line,
                column: at.column,
            });
        }

        Ok(root)
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.')
}

/// Reads every top-level record of `src`.
pub fn read_records(src: &str) -> Result<Vec<Record>, ReadError> {
    Reader::new(src).read()
}

/// Same as [`read_records`], with the source name attached to errors.
pub fn parse_source(src: &str, file: &str) -> Result<Vec<Record>, ParseError> {
    read_records(src).map_err(|source| ParseError {
        file: file.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(s: &str) -> Record {
        Record::Atom(s.to_string())
    }

    fn number(value: f64, lexeme: &str) -> Record {
        Record::Number {
            value,
            lexeme: lexeme.to_string(),
        }
    }

    #[test]
    fn test_nested_lists() {
        let records = read_records(r#"(a (b "c" 1.5) d)"#).unwrap();
        assert_eq!(
            records,
            vec![Record::List(vec![
                atom("a"),
                Record::List(vec![atom("b"), Record::Str("c".to_string()), number(1.5, "1.5")]),
                atom("d"),
            ])]
        );
    }

    #[test]
    fn test_balanced_close() {
        let records = read_records("(a (b))").unwrap();
        assert_eq!(
            records,
            vec![Record::List(vec![atom("a"), Record::List(vec![atom("b")])])]
        );
    }

    #[test]
    fn test_missing_close_is_rejected() {
        let err = read_records("(a (b)").unwrap_err();
        assert_eq!(
            err,
            ReadError::UnclosedList {
                depth: 1,
                line: 1,
                column: 1
            }
        );
    }

    #[test]
    fn test_extra_close_is_rejected() {
        let err = read_records("(a)\n)").unwrap_err();
        assert_eq!(err, ReadError::UnmatchedClose { line: 2, column: 1 });
    }

    #[test]
    fn test_comments_run_to_end_of_line() {
        let src = "; header comment (ignored\n(object Widget) ; trailing )\n(enum X)";
        let records = read_records(src).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].head(), Some("object"));
        assert_eq!(records[1].head(), Some("enum"));
    }

    #[test]
    fn test_lists_span_lines() {
        let records = read_records("(method show\n  (of-object Widget (Gtk))\n  (c-name gtk_widget_show))").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_list().unwrap().len(), 4);
    }

    #[test]
    fn test_symbols_keep_pointer_and_dash_characters() {
        let records = read_records("(const-gchar* GtkWidget** a\"b)").unwrap();
        assert_eq!(
            records,
            vec![Record::List(vec![atom("const-gchar*"), atom("GtkWidget**"), atom("a\"b")])]
        );
    }

    #[test]
    fn test_numbers() {
        let records = read_records("(1 -2 +3.5 .25 1.2.3 - x-1)").unwrap();
        assert_eq!(
            records,
            vec![Record::List(vec![
                number(1.0, "1"),
                number(-2.0, "-2"),
                number(3.5, "+3.5"),
                number(0.25, ".25"),
                atom("1.2.3"),
                atom("-"),
                atom("x-1"),
            ])]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = read_records("(default \"abc)").unwrap_err();
        assert_eq!(err, ReadError::UnterminatedString { line: 1, column: 10 });
    }

    #[test]
    fn test_top_level_atoms_are_kept() {
        let records = read_records("stray (a)").unwrap();
        assert_eq!(records[0], atom("stray"));
    }

    #[test]
    fn test_parse_error_names_the_source() {
        let err = parse_source("(", "gtk.defs").unwrap_err();
        assert_eq!(err.file, "gtk.defs");
        assert_eq!(
            err.to_string(),
            "parse error in gtk.defs:1:1: unmatched parentheses, 1 list(s) still open at end of input"
        );
    }

    #[test]
    fn test_to_text() {
        assert_eq!(number(0.0, "0").to_text().as_deref(), Some("0"));
        assert_eq!(number(-1.5, "-1.5").to_text().as_deref(), Some("-1.5"));
        assert_eq!(Record::Str("x".into()).to_text().as_deref(), Some("x"));
        assert_eq!(Record::List(vec![]).to_text(), None);
    }

    #[test]
    fn test_display_round_trips_shape() {
        let records = read_records(r#"(a (b "c") 2)"#).unwrap();
        assert_eq!(records[0].to_string(), r#"(a (b "c") 2)"#);
    }

    #[test]
    fn test_numbers_keep_source_spelling() {
        let records = read_records("(default 18446744073709551615) (default 1.50)").unwrap();
        let values: Vec<&Record> = records.iter().map(|r| &r.as_list().unwrap()[1]).collect();
        assert_eq!(values[0].to_text().as_deref(), Some("18446744073709551615"));
        assert_eq!(values[0].as_number(), Some(u64::MAX as f64));
        assert_eq!(values[1].to_text().as_deref(), Some("1.50"));
        assert_eq!(values[1].to_string(), "1.50");
    }
}
