//! # Path Data Tokenizer
//!
//! Turns an SVG path `d` string into a typed command stream in two steps:
//!
//! 1. [`Lexer`] scans characters into [`Token`]s (command letters and numbers).
//! 2. [`parse_path_data`] groups the tokens into [`PathCommand`]s.
//!
//! Supported commands are `M L H V C Q A Z` in both cases; uppercase is
//! absolute, lowercase is relative to the current point. Smooth shorthands
//! (`S`, `T`) and any other letter are skipped together with their numeric
//! arguments. That input is logged, never rejected.

use tracing::debug;

/// Kind of a path command, independent of absolute/relative mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CubicCurveTo,
    QuadraticCurveTo,
    ArcTo,
    ClosePath,
}

impl CommandKind {
    /// Map a command letter to its kind and relative flag.
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::HorizontalLineTo,
            'V' => Self::VerticalLineTo,
            'C' => Self::CubicCurveTo,
            'Q' => Self::QuadraticCurveTo,
            'A' => Self::ArcTo,
            'Z' => Self::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// Number of arguments consumed by one repetition of the command.
    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 2,
            Self::HorizontalLineTo | Self::VerticalLineTo => 1,
            Self::CubicCurveTo => 6,
            Self::QuadraticCurveTo => 4,
            Self::ArcTo => 7,
            Self::ClosePath => 0,
        }
    }
}

/// One command letter with every number that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub args: Vec<f64>,
}

impl PathCommand {
    pub fn new(kind: CommandKind, relative: bool) -> Self {
        Self {
            kind,
            relative,
            args: Vec::new(),
        }
    }

    /// Argument groups, one per implicit repetition.
    ///
    /// A trailing incomplete group is dropped. `ClosePath` has no groups.
    pub fn groups(&self) -> impl Iterator<Item = &[f64]> {
        let arity = self.kind.arity();
        let usable = if arity == 0 { 0 } else { self.args.len() };
        self.args[..usable].chunks_exact(arity.max(1))
    }
}

/// Lexical token of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// Character scanner over path data.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Scan a number starting at the current position.
    ///
    /// Returns `None` and consumes one byte when no digits are present
    /// (a lone sign or dot).
    fn scan_number(&mut self) -> Option<f64> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            self.pos = start + 1;
            return None;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let exponent_digit_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if self.peek_at(exponent_digit_at).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += exponent_digit_at;
                self.skip_digits();
            }
        }

        self.src[start..self.pos].parse::<f64>().ok()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let byte = self.peek()?;
            match byte {
                b if b.is_ascii_whitespace() || b == b',' => self.pos += 1,
                b if b.is_ascii_alphabetic() => {
                    self.pos += 1;
                    return Some(Token::Command(b as char));
                }
                b'0'..=b'9' | b'.' | b'+' | b'-' => {
                    if let Some(value) = self.scan_number() {
                        return Some(Token::Number(value));
                    }
                }
                _ => {
                    // Step over the whole (possibly multi-byte) character.
                    let width = self.src[self.pos..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    self.pos += width;
                }
            }
        }
    }
}

/// Group path data into commands.
pub fn parse_path_data(d: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<PathCommand> = None;
    let mut skipping = false;

    for token in Lexer::new(d) {
        match token {
            Token::Command(letter) => {
                commands.extend(current.take());
                match CommandKind::from_letter(letter) {
                    Some((kind, relative)) => {
                        current = Some(PathCommand::new(kind, relative));
                        skipping = false;
                    }
                    None => {
                        debug!("Skipping unsupported path command '{}'", letter);
                        skipping = true;
                    }
                }
            }
            Token::Number(value) => match current.as_mut() {
                Some(command) => command.args.push(value),
                None if skipping => {}
                None => debug!("Ignoring number {} before any path command", value),
            },
        }
    }
    commands.extend(current);
    commands
}
