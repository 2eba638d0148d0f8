//! Lexer (tokenizer) for the circuit DSL.
//!
//! Invalid characters never abort the scan: each one is recorded as a
//! [`Diagnostic`] and skipped.

use std::fmt;

use tracing::debug;

use crate::circuit::{Diagnostic, DiagnosticKind};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `circuit`
    Circuit,
    /// `logic_gate`
    LogicGate,
    /// `input`
    Input,
    /// `output`
    Output,
    /// `connection`
    Connection,
    /// `connect`
    Connect,
    /// `input_count`
    InputCount,
    /// `output_count`
    OutputCount,
    /// `truth_table`
    TruthTable,
    /// `initial_value`
    InitialValue,
    /// Any other identifier (component names, gate types, pin labels)
    Identifier,
    /// Non-negative decimal integer
    Integer,
    /// `->`
    Arrow,
    /// `.`
    Dot,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Map an identifier to its keyword kind, if it is reserved.
    pub fn keyword(text: &str) -> Option<Self> {
        match text {
            "circuit" => Some(Self::Circuit),
            "logic_gate" => Some(Self::LogicGate),
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            "connection" => Some(Self::Connection),
            "connect" => Some(Self::Connect),
            "input_count" => Some(Self::InputCount),
            "output_count" => Some(Self::OutputCount),
            "truth_table" => Some(Self::TruthTable),
            "initial_value" => Some(Self::InitialValue),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Circuit => "'circuit'",
            Self::LogicGate => "'logic_gate'",
            Self::Input => "'input'",
            Self::Output => "'output'",
            Self::Connection => "'connection'",
            Self::Connect => "'connect'",
            Self::InputCount => "'input_count'",
            Self::OutputCount => "'output_count'",
            Self::TruthTable => "'truth_table'",
            Self::InitialValue => "'initial_value'",
            Self::Identifier => "identifier",
            Self::Integer => "integer",
            Self::Arrow => "'->'",
            Self::Dot => "'.'",
            Self::OpenBrace => "'{'",
            Self::CloseBrace => "'}'",
            Self::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// Lexer for tokenizing circuit DSL input.
///
/// The lexer is an [`Iterator`] over tokens that stops before [`TokenKind::Eof`];
/// [`Lexer::next_token`] returns `Eof` forever once the input is exhausted.
/// Scanning the same text again means building a new `Lexer`.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Consume the lexer, returning its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            let ch = match self.chars.peek().copied() {
                Some(ch) => ch,
                None => return self.make(TokenKind::Eof, String::new(), self.line, self.column),
            };

            let line = self.line;
            let column = self.column;

            match ch {
                '.' => {
                    self.advance();
                    return self.make(TokenKind::Dot, ".".to_string(), line, column);
                }
                '{' => {
                    self.advance();
                    return self.make(TokenKind::OpenBrace, "{".to_string(), line, column);
                }
                '}' => {
                    self.advance();
                    return self.make(TokenKind::CloseBrace, "}".to_string(), line, column);
                }
                '-' => {
                    self.advance();
                    if self.chars.peek() == Some(&'>') {
                        self.advance();
                        return self.make(TokenKind::Arrow, "->".to_string(), line, column);
                    }
                    self.invalid_character('-', line);
                }
                '0'..='9' => {
                    let text = self.read_while(|c| c.is_ascii_digit());
                    return self.make(TokenKind::Integer, text, line, column);
                }
                _ if ch.is_ascii_alphabetic() || ch == '_' => {
                    let text = self.read_while(|c| c.is_ascii_alphanumeric() || c == '_');
                    let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
                    return self.make(kind, text, line, column);
                }
                _ => {
                    self.advance();
                    self.invalid_character(ch, line);
                }
            }
        }
    }

    fn make(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn invalid_character(&mut self, ch: char, line: usize) {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::Lexical,
            Some(line),
            format!("invalid character '{}'", ch),
        );
        debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n' {
                self.advance();
            } else if ch == '/' && self.starts_comment() {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Whether the upcoming `/` is followed by another `/`.
    fn starts_comment(&self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next() == Some('/')
    }

    fn read_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if keep(ch) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_keywords_and_identifiers() {
        let tokens: Vec<Token> = Lexer::new("logic_gate AND g1 input_count").collect();
        assert_eq!(tokens[0].kind, TokenKind::LogicGate);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "AND");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].kind, TokenKind::InputCount);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(kinds("Circuit circuit"), vec![TokenKind::Identifier, TokenKind::Circuit]);
    }

    #[test]
    fn test_lexer_punctuation() {
        assert_eq!(
            kinds("A.output -> g1.input0 { }"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Output,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_integer_then_identifier() {
        let tokens: Vec<Token> = Lexer::new("10abc").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].text, "10");
        assert_eq!(tokens[1].text, "abc");
    }

    #[test]
    fn test_comments_and_line_numbers() {
        let input = "// header\ncircuit X { // trailing\n\n}";
        let tokens: Vec<Token> = Lexer::new(input).collect();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[0].column, 1);
        assert_eq!(tokens[3].kind, TokenKind::CloseBrace);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn test_invalid_characters_are_skipped() {
        let mut lexer = Lexer::new("a $ b\n- / c");
        let texts: Vec<String> = lexer.by_ref().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);

        let diagnostics = lexer.into_diagnostics();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].to_string(), "line 1: invalid character '$'");
        assert_eq!(diagnostics[1].line, Some(2));
        assert_eq!(diagnostics[2].message, "invalid character '/'");
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
