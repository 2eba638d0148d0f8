//! Parser for the circuit DSL.
//!
//! A recursive-descent parser that registers each declaration in the target
//! [`Circuit`] as soon as it has been read. A syntax error stops the parse
//! immediately; whatever was registered before it stays in the circuit.

use tracing::{debug, info, trace};

use super::lexer::{Lexer, Token, TokenKind};
use crate::circuit::{
    Bit, Circuit, Connection, Diagnostic, DiagnosticKind, Gate, Input, Output, PinRef, TableRow,
    TruthTable,
};
use crate::error::{LogicError, Result};

/// Parser for circuit DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    diagnostics: Vec<Diagnostic>,
}

/// Properties collected from a gate body.
#[derive(Default)]
struct GateProps {
    input_count: Option<usize>,
    output_count: Option<usize>,
    table: Option<TruthTable>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            diagnostics: Vec::new(),
        }
    }

    /// Parse one circuit declaration into `circuit`.
    pub fn parse_into(&mut self, circuit: &mut Circuit) -> Result<()> {
        self.expect(TokenKind::Circuit)?;
        let name = self.expect(TokenKind::Identifier)?.text;
        circuit.name = Some(name.clone());
        self.expect(TokenKind::OpenBrace)?;

        while self.current.kind != TokenKind::CloseBrace {
            self.parse_declaration(circuit)?;
        }
        self.advance();

        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected("end of input after the circuit body"));
        }

        info!("circuit '{}' defined", name);
        Ok(())
    }

    /// Lexical diagnostics followed by dropped-declaration diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.lexer.into_diagnostics();
        diagnostics.extend(self.diagnostics);
        diagnostics
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance();
            Ok(tok)
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> LogicError {
        let found = match self.current.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.current.text),
        };
        LogicError::parse(
            self.current.line,
            format!("unexpected {}, expected {}", found, expected),
        )
    }

    fn parse_declaration(&mut self, circuit: &mut Circuit) -> Result<()> {
        match self.current.kind {
            TokenKind::LogicGate => self.parse_gate(circuit),
            TokenKind::Input => self.parse_input(circuit),
            TokenKind::Output => self.parse_output(circuit),
            TokenKind::Connection => self.parse_connection(circuit),
            _ => Err(self.unexpected("a declaration or '}'")),
        }
    }

    fn parse_gate(&mut self, circuit: &mut Circuit) -> Result<()> {
        let line = self.current.line;
        self.advance();
        let gate_type = self.expect(TokenKind::Identifier)?.text;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::OpenBrace)?;

        let mut props = GateProps::default();
        loop {
            match self.current.kind {
                TokenKind::InputCount => {
                    self.advance();
                    props.input_count = Some(self.count()?);
                }
                TokenKind::OutputCount => {
                    self.advance();
                    props.output_count = Some(self.count()?);
                }
                TokenKind::TruthTable => {
                    props.table = Some(self.parse_truth_table()?);
                }
                TokenKind::CloseBrace if props.any() => break,
                _ => return Err(self.unexpected("'input_count', 'output_count' or 'truth_table'")),
            }
        }
        self.advance();

        match props {
            GateProps {
                input_count: Some(input_count),
                output_count: Some(output_count),
                table: Some(table),
            } => {
                debug!(
                    "gate '{}' ({}) defined with {} inputs, {} rows",
                    name,
                    gate_type,
                    input_count,
                    table.len()
                );
                circuit.add_gate(Gate::new(name, gate_type, input_count, output_count, table));
            }
            props => {
                let diagnostic = Diagnostic::new(
                    DiagnosticKind::Declaration,
                    Some(line),
                    format!(
                        "gate '{}' dropped: missing {}",
                        name,
                        props.missing().join(", ")
                    ),
                );
                debug!("{}", diagnostic);
                self.diagnostics.push(diagnostic);
            }
        }
        Ok(())
    }

    fn parse_truth_table(&mut self) -> Result<TruthTable> {
        self.advance();
        self.expect(TokenKind::OpenBrace)?;

        let mut rows = Vec::new();
        loop {
            let row = self.parse_row()?;
            trace!("truth table row {}", row);
            rows.push(row);
            if self.current.kind == TokenKind::CloseBrace {
                break;
            }
        }
        self.advance();

        Ok(TruthTable::new(rows))
    }

    /// `bits -> BIT`. A row ends after its single output bit, so rows may
    /// share a line.
    fn parse_row(&mut self) -> Result<TableRow> {
        let mut inputs = vec![self.bit()?];
        while self.current.kind == TokenKind::Integer {
            inputs.push(self.bit()?);
        }
        self.expect(TokenKind::Arrow)?;
        let output = self.bit()?;

        Ok(TableRow::new(inputs, output))
    }

    fn parse_input(&mut self, circuit: &mut Circuit) -> Result<()> {
        self.advance();
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::OpenBrace)?;
        self.expect(TokenKind::InitialValue)?;
        let value = self.bit()?;
        self.expect(TokenKind::CloseBrace)?;

        debug!("input '{}' = {} defined", name, value);
        circuit.add_input(Input::new(name, value));
        Ok(())
    }

    fn parse_output(&mut self, circuit: &mut Circuit) -> Result<()> {
        self.advance();
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::OpenBrace)?;
        self.expect(TokenKind::CloseBrace)?;

        debug!("output '{}' defined", name);
        circuit.add_output(Output::new(name));
        Ok(())
    }

    fn parse_connection(&mut self, circuit: &mut Circuit) -> Result<()> {
        self.advance();
        self.expect(TokenKind::Connect)?;
        let source = self.parse_pin()?;
        self.expect(TokenKind::Arrow)?;
        let destination = self.parse_pin()?;

        let connection = Connection::new(source, destination);
        debug!("connection {}", connection);
        circuit.connect(connection);
        Ok(())
    }

    /// `IDENT "." (IDENT | "input" | "output")`
    fn parse_pin(&mut self) -> Result<PinRef> {
        let component = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Dot)?;
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Input | TokenKind::Output => {
                let pin = self.current.text.clone();
                self.advance();
                Ok(PinRef::new(component, pin))
            }
            _ => Err(self.unexpected("pin name")),
        }
    }

    fn integer(&mut self) -> Result<Token> {
        self.expect(TokenKind::Integer)
    }

    fn bit(&mut self) -> Result<Bit> {
        let tok = self.integer()?;
        tok.text
            .parse()
            .map_err(|_| LogicError::invalid_literal(tok.line, tok.text))
    }

    fn count(&mut self) -> Result<usize> {
        let tok = self.integer()?;
        tok.text
            .parse()
            .map_err(|_| LogicError::invalid_literal(tok.line, tok.text))
    }
}

impl GateProps {
    fn any(&self) -> bool {
        self.input_count.is_some() || self.output_count.is_some() || self.table.is_some()
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.input_count.is_none() {
            missing.push("input_count");
        }
        if self.output_count.is_none() {
            missing.push("output_count");
        }
        if self.table.is_none() {
            missing.push("truth_table");
        }
        missing
    }
}
