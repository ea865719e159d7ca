//! Mocked Python execution sandbox.
//!
//! Validates submitted code against a blocklist, then "executes" it with a
//! tiny interpreter covering the arithmetic `print()` programs the demo
//! agents actually generate. Anything beyond that returns a notice instead
//! of failing, so the agent loop keeps moving.

use std::collections::HashMap;

/// Constructs that must never appear in submitted code.
const BLOCKED_PATTERNS: &[&str] = &[
    "import os",
    "import sys",
    "import subprocess",
    "import shutil",
    "import socket",
    "__import__",
    "open(",
    "eval(",
    "exec(",
    "compile(",
    "globals(",
    "while True",
];

const MOCK_NOTICE: &str =
    "[sandbox] execution is mocked; only arithmetic expressions, assignments, \
     and print() are interpreted";

/// Mocked sandbox for model-submitted Python snippets.
pub struct PythonSandbox {
    variables: HashMap<String, f64>,
}

impl PythonSandbox {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Validate that `code` contains no blocked construct.
    pub fn validate(&self, code: &str) -> Result<(), String> {
        for pattern in BLOCKED_PATTERNS {
            if code.contains(pattern) {
                return Err(format!("code rejected: contains blocked construct '{pattern}'"));
            }
        }
        Ok(())
    }

    /// Validate and run `code`, returning collected `print()` output.
    ///
    /// Supported lines: `name = <expr>`, `print(<expr>)`, `print('text')`,
    /// comments, and blanks. Unsupported lines degrade to a notice.
    pub fn execute(mut self, code: &str) -> Result<String, String> {
        self.validate(code)?;

        let mut output = Vec::new();
        let mut saw_unsupported = false;

        for line in code.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(inner) = line
                .strip_prefix("print(")
                .and_then(|rest| rest.strip_suffix(')'))
            {
                let inner = inner.trim();
                // String literal; a lone quote is not one
                if inner.len() >= 2
                    && ((inner.starts_with('\'') && inner.ends_with('\''))
                        || (inner.starts_with('"') && inner.ends_with('"')))
                {
                    output.push(inner[1..inner.len() - 1].to_string());
                    continue;
                }
                match self.eval(inner) {
                    Ok(value) => output.push(format_number(value)),
                    Err(_) => saw_unsupported = true,
                }
                continue;
            }

            if let Some((name, expr)) = line.split_once('=') {
                let name = name.trim();
                if is_identifier(name) && !expr.starts_with('=') {
                    match self.eval(expr.trim()) {
                        Ok(value) => {
                            self.variables.insert(name.to_string(), value);
                        }
                        Err(_) => saw_unsupported = true,
                    }
                    continue;
                }
            }

            saw_unsupported = true;
        }

        if saw_unsupported {
            output.push(MOCK_NOTICE.to_string());
        }
        if output.is_empty() {
            output.push("(no output)".to_string());
        }
        Ok(output.join("\n"))
    }

    /// Evaluate an arithmetic expression with `+ - * / ( )`, numbers, and
    /// previously assigned variables.
    fn eval(&self, expr: &str) -> Result<f64, String> {
        let tokens = tokenize(expr, &self.variables)?;
        let mut parser = Parser { tokens, pos: 0 };
        let value = parser.expression()?;
        if parser.pos != parser.tokens.len() {
            return Err("trailing tokens in expression".to_string());
        }
        Ok(value)
    }
}

impl Default for PythonSandbox {
    fn default() -> Self {
        Self::new()
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Integers print without a trailing `.0`, matching what Python would show
/// for the integer-only programs the demos produce.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expr: &str, variables: &HashMap<String, f64>) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let n = text
                    .parse::<f64>()
                    .map_err(|_| format!("bad number '{text}'"))?;
                tokens.push(Token::Number(n));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let value = variables
                    .get(&name)
                    .ok_or_else(|| format!("unknown variable '{name}'"))?;
                tokens.push(Token::Number(*value));
            }
            other => return Err(format!("unsupported character '{other}'")),
        }
    }
    Ok(tokens)
}

/// Recursive-descent parser: expression -> term -> factor.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(n)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let value = self.expression()?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    _ => Err("missing closing parenthesis".to_string()),
                }
            }
            other => Err(format!("unexpected token {other:?}")),
        }
    }
}
