//! `calculator_tool`: safe arithmetic evaluation.
//!
//! Expressions are parsed by a small recursive-descent parser; nothing is
//! ever handed to an interpreter.
//!
//! # Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | name | name '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! `-2^2` is `-4` and `2^3^2` is `512`.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `expression` | string | Yes | Expression to evaluate |
//! | `precision` | integer | No | Decimal places (0-10) |

use async_trait::async_trait;
use serde_json::{Value, json};
use toolcall_domain::agent::rules::CALCULATOR_TOOL;
use toolcall_domain::{ParamType, ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};
use tracing::debug;

use super::args::{opt_u64, require_str};

/// Largest magnitude rendered as an integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Nesting bound for parentheses, signs and exponent chains.
const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Default)]
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolHandler for CalculatorTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            CALCULATOR_TOOL,
            "Evaluate a mathematical expression safely. Supports + - * / % ^, parentheses, \
             abs sqrt sin cos tan log log10 exp ceil floor round min max, and the constants pi and e.",
        )
        .with_parameter(ToolParameter::new(
            "expression",
            "Mathematical expression, e.g. '2 + 2', 'sqrt(16)', '10 * (5 + 3)'",
            true,
        ))
        .with_parameter(
            ToolParameter::new("precision", "Decimal places to round the result to", false)
                .with_type(ParamType::Integer)
                .with_range(Some(0.0), Some(10.0)),
        )
        .with_output(
            ToolParameter::new("result", "Numeric result", true).with_type(ParamType::Number),
        )
        .with_output(ToolParameter::new("formatted_result", "Result as text", true))
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<Value, ToolError> {
        let expression = require_str(arguments, "expression")?;
        let precision = opt_u64(arguments, "precision").map(|p| p.min(10) as usize);

        debug!(expression, "Evaluating expression");
        let value = evaluate(expression).map_err(|e| ToolError::invalid_argument(e.to_string()))?;

        let (result, formatted) = match precision {
            Some(digits) => {
                let factor = 10f64.powi(digits as i32);
                let rounded = (value * factor).round() / factor;
                (json!(rounded), format!("{:.*}", digits, rounded))
            }
            None => (number_value(value), format_number(value)),
        };

        Ok(json!({
            "expression": expression,
            "result": result,
            "formatted_result": formatted,
            "summary": format!("{} = {}", expression, formatted),
        }))
    }
}

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("Invalid expression: {0}")]
    Syntax(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown name: {0}")]
    UnknownName(String),

    #[error("Invalid value: {0}")]
    Domain(String),
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::Syntax("empty expression".to_string()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(CalcError::Syntax(format!("unexpected {}", token)));
    }
    if !value.is_finite() {
        return Err(CalcError::Domain("result is not a finite number".to_string()));
    }
    Ok(value)
}

fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        json!(value as i64)
    } else {
        json!(value)
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Op(char),
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Name(name) => write!(f, "name '{}'", name),
            Token::Op(op) => write!(f, "operator '{}'", op),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // Scientific notation: 1e3, 2.5E-4
                if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && matches!(chars[j], '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let n = text
                    .parse::<f64>()
                    .map_err(|_| CalcError::Syntax(format!("bad number '{}'", text)))?;
                tokens.push(Token::Number(n));
            }
            'π' => {
                tokens.push(Token::Name("pi".to_string()));
                i += 1;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push(Token::Name(name.to_lowercase()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Op('^'));
                i += 2;
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                tokens.push(Token::Op(c));
                i += 1;
            }
            '×' => {
                tokens.push(Token::Op('*'));
                i += 1;
            }
            '÷' => {
                tokens.push(Token::Op('/'));
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
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            other => {
                return Err(CalcError::Syntax(format!("unsupported character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), CalcError> {
        match self.next() {
            Some(ref token) if *token == expected => Ok(()),
            Some(token) => Err(CalcError::Syntax(format!(
                "expected {}, found {}",
                expected, token
            ))),
            None => Err(CalcError::Syntax(format!(
                "expected {}, found end of input",
                expected
            ))),
        }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/', '%']) {
            let rhs = self.unary()?;
            value = match op {
                '*' => value * rhs,
                _ if rhs == 0.0 => return Err(CalcError::DivisionByZero),
                '/' => value / rhs,
                // Floored modulo, sign follows the divisor
                _ => value - rhs * (value / rhs).floor(),
            };
        }
        Ok(value)
    }

    // Every recursive path (parentheses, function arguments, signs,
    // exponents) passes through here, so depth is bounded in one place.
    fn unary(&mut self) -> Result<f64, CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::Syntax("expression nested too deeply".to_string()));
        }
        let value = match self.eat_op(&['-', '+']) {
            Some('-') => self.unary().map(|v| -v),
            Some(_) => self.unary(),
            None => self.power(),
        };
        self.depth -= 1;
        value
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.unary()?;
            if base == 0.0 && exponent < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Name(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.arguments()?;
                    apply_function(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some(token) => Err(CalcError::Syntax(format!("unexpected {}", token))),
            None => Err(CalcError::Syntax("unexpected end of input".to_string())),
        }
    }

    fn arguments(&mut self) -> Result<Vec<f64>, CalcError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                Some(token) => {
                    return Err(CalcError::Syntax(format!(
                        "expected ',' or ')', found {}",
                        token
                    )));
                }
                None => return Err(CalcError::Syntax("unclosed '('".to_string())),
            }
        }
    }
}

fn constant(name: &str) -> Result<f64, CalcError> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" => Ok(std::f64::consts::E),
        "tau" => Ok(std::f64::consts::TAU),
        _ => Err(CalcError::UnknownName(name.to_string())),
    }
}

fn apply_function(name: &str, args: &[f64]) -> Result<f64, CalcError> {
    let arity = |expected: usize| -> Result<(), CalcError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(CalcError::Syntax(format!(
                "{}() takes {} argument(s), got {}",
                name,
                expected,
                args.len()
            )))
        }
    };

    match name {
        "abs" | "sqrt" | "sin" | "cos" | "tan" | "log10" | "exp" | "ceil" | "floor" => {
            arity(1)?;
            let x = args[0];
            match name {
                "abs" => Ok(x.abs()),
                "sqrt" if x < 0.0 => Err(CalcError::Domain(
                    "square root of a negative number".to_string(),
                )),
                "sqrt" => Ok(x.sqrt()),
                "sin" => Ok(x.sin()),
                "cos" => Ok(x.cos()),
                "tan" => Ok(x.tan()),
                "log10" if x <= 0.0 => Err(CalcError::Domain(
                    "logarithm of a non-positive number".to_string(),
                )),
                "log10" => Ok(x.log10()),
                "exp" => Ok(x.exp()),
                "ceil" => Ok(x.ceil()),
                _ => Ok(x.floor()),
            }
        }
        "log" => match args {
            [x] if *x > 0.0 => Ok(x.ln()),
            [x, base] if *x > 0.0 && *base > 0.0 && *base != 1.0 => Ok(x.log(*base)),
            [_] | [_, _] => Err(CalcError::Domain(
                "logarithm of a non-positive number or invalid base".to_string(),
            )),
            _ => Err(CalcError::Syntax(format!(
                "log() takes 1 or 2 arguments, got {}",
                args.len()
            ))),
        },
        "round" => match args {
            [x] => Ok(x.round()),
            [x, digits] => {
                let factor = 10f64.powi(*digits as i32);
                Ok((x * factor).round() / factor)
            }
            _ => Err(CalcError::Syntax(format!(
                "round() takes 1 or 2 arguments, got {}",
                args.len()
            ))),
        },
        "min" | "max" => {
            if args.is_empty() {
                return Err(CalcError::Syntax(format!(
                    "{}() needs at least one argument",
                    name
                )));
            }
            let fold: fn(f64, f64) -> f64 = if name == "min" { f64::min } else { f64::max };
            Ok(args[1..].iter().fold(args[0], |acc, &x| fold(acc, x)))
        }
        _ => Err(CalcError::UnknownName(name.to_string())),
    }
}
