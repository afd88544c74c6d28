//! Arithmetic expressions over puzzle numbers.
//!
//! ## Syntax
//!
//! Non-negative integer literals, the four binary operators (`*` and `/`
//! also accept `×` and `÷`), parentheses and whitespace. The usual
//! precedence applies and operators are left-associative. There is no
//! unary minus.
//!
//! ## Display
//!
//! Every non-literal operand is parenthesised, so the printed form parses
//! back to the same tree: `(8/(3-1))*6`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{InvalidAction, ParseError, RuleResult};

/// Divisors closer to zero than this are treated as zero.
pub const DIVISOR_EPSILON: f64 = 1e-6;

/// Deepest bracket nesting the parser accepts.
pub const MAX_NESTING: usize = 32;

/// Most literals the parser accepts in one expression.
pub const MAX_NUMBERS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    /// `None` when dividing by (near) zero.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Op::Add => Some(lhs + rhs),
            Op::Sub => Some(lhs - rhs),
            Op::Mul => Some(lhs * rhs),
            Op::Div => (rhs.abs() >= DIVISOR_EPSILON).then(|| lhs / rhs),
        }
    }

    fn from_char(ch: char) -> Option<Op> {
        match ch {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' | '×' => Some(Op::Mul),
            '/' | '÷' => Some(Op::Div),
            _ => None,
        }
    }
}

/// Expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Num(u32),
    Binary {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    #[must_use]
    pub fn binary(op: Op, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate in floating point.
    pub fn eval(&self) -> RuleResult<f64> {
        match self {
            Expr::Num(n) => Ok(f64::from(*n)),
            Expr::Binary { op, lhs, rhs } => {
                let (l, r) = (lhs.eval()?, rhs.eval()?);
                op.apply(l, r)
                    .ok_or_else(|| InvalidAction::DivisionByZero.into())
            }
        }
    }

    /// Literals in left-to-right order.
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        let mut out = Vec::new();
        self.collect_numbers(&mut out);
        out
    }

    fn collect_numbers(&self, out: &mut Vec<u32>) {
        match self {
            Expr::Num(n) => out.push(*n),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_numbers(out);
                rhs.collect_numbers(out);
            }
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Binary { .. } => write!(f, "({self})"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Binary { op, lhs, rhs } => {
                lhs.fmt_operand(f)?;
                write!(f, "{}", op.symbol())?;
                rhs.fmt_operand(f)
            }
        }
    }
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        let mut parser = Parser {
            tokens,
            at: 0,
            depth: 0,
        };
        let expr = parser.expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(tok) => Err(ParseError::UnexpectedToken(tok.pos)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TokenKind {
    Num(u32),
    Op(Op),
    Open,
    Close,
}

#[derive(Clone, Copy, Debug)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

fn tokenize(s: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut numbers = 0;
    let mut chars = s.chars().enumerate().peekable();

    while let Some((pos, ch)) = chars.next() {
        let kind = match ch {
            c if c.is_whitespace() => continue,
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            c if c.is_ascii_digit() => {
                let mut value = c.to_digit(10).map_or(0, u64::from);
                while let Some(&(_, next)) = chars.peek() {
                    let Some(d) = next.to_digit(10) else { break };
                    value = value * 10 + u64::from(d);
                    if value > u64::from(u32::MAX) {
                        return Err(ParseError::NumberTooLarge(pos));
                    }
                    chars.next();
                }
                numbers += 1;
                if numbers > MAX_NUMBERS {
                    return Err(ParseError::TooManyNumbers(pos));
                }
                TokenKind::Num(value as u32)
            }
            c => match Op::from_char(c) {
                Some(op) => TokenKind::Op(op),
                None => return Err(ParseError::UnexpectedChar { ch: c, pos }),
            },
        };
        tokens.push(Token { kind, pos });
    }
    Ok(tokens)
}

/// Recursive descent over the token list. Recursion is bounded by
/// `MAX_NESTING`, and tree depth by `MAX_NUMBERS`.
struct Parser {
    tokens: Vec<Token>,
    at: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.at).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        self.at += 1;
        tok
    }

    fn binary_op(&self, ops: [Op; 2]) -> Option<Op> {
        match self.peek()?.kind {
            TokenKind::Op(op) if ops.contains(&op) => Some(op),
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.binary_op([Op::Add, Op::Sub]) {
            self.bump();
            lhs = Expr::binary(op, lhs, self.term()?);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.binary_op([Op::Mul, Op::Div]) {
            self.bump();
            lhs = Expr::binary(op, lhs, self.factor()?);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let tok = self.bump().ok_or(ParseError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Num(n) => Ok(Expr::Num(n)),
            TokenKind::Open => {
                if self.depth == MAX_NESTING {
                    return Err(ParseError::TooDeep(tok.pos));
                }
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.bump() {
                    Some(Token {
                        kind: TokenKind::Close,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ParseError::UnexpectedToken(other.pos)),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            TokenKind::Op(_) | TokenKind::Close => Err(ParseError::UnexpectedToken(tok.pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(parse("2+3*4").eval().unwrap(), 14.0);
        assert_eq!(parse("(2+3)*4").eval().unwrap(), 20.0);
        assert_eq!(parse("10-4-3").eval().unwrap(), 3.0);
        assert_eq!(parse("24/4/2").eval().unwrap(), 3.0);
    }

    #[test]
    fn test_display_round_trips() {
        let e = parse("8 / (3 - 1) * 6");
        assert_eq!(e.to_string(), "(8/(3-1))*6");
        assert_eq!(parse(&e.to_string()), e);
        assert_eq!(e.eval().unwrap(), 24.0);
    }

    #[test]
    fn test_alternate_operator_symbols() {
        assert_eq!(parse("6×8÷2"), parse("6*8/2"));
    }

    #[test]
    fn test_numbers_in_order() {
        assert_eq!(parse("(13-1)*(1+1)").numbers(), vec![13, 1, 1, 1]);
    }

    #[test]
    fn test_fractional_intermediate() {
        let e = parse("8/(3-8/3)");
        assert!((e.eval().unwrap() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            parse("4/(2-2)").eval().unwrap_err(),
            InvalidAction::DivisionByZero.into()
        );
    }

    #[test]
    fn test_nesting_and_size_limits() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(parse(&nested(MAX_NESTING)), Expr::Num(1));
        assert_eq!(
            nested(MAX_NESTING + 1).parse::<Expr>().unwrap_err(),
            ParseError::TooDeep(MAX_NESTING)
        );
        assert_eq!(
            nested(200_000).parse::<Expr>().unwrap_err(),
            ParseError::TooDeep(MAX_NESTING)
        );

        let sum = |n: usize| vec!["1"; n].join("+");
        assert_eq!(parse(&sum(MAX_NUMBERS)).eval().unwrap(), MAX_NUMBERS as f64);
        assert_eq!(
            sum(100_000).parse::<Expr>().unwrap_err(),
            ParseError::TooManyNumbers(2 * MAX_NUMBERS)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Expr>().unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!("1+".parse::<Expr>().unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!("(1+2".parse::<Expr>().unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!("1 2".parse::<Expr>().unwrap_err(), ParseError::UnexpectedToken(2));
        assert_eq!("-3+4".parse::<Expr>().unwrap_err(), ParseError::UnexpectedToken(0));
        assert_eq!("1)".parse::<Expr>().unwrap_err(), ParseError::UnexpectedToken(1));
        assert_eq!(
            "3^2".parse::<Expr>().unwrap_err(),
            ParseError::UnexpectedChar { ch: '^', pos: 1 }
        );
        assert_eq!(
            "1+99999999999".parse::<Expr>().unwrap_err(),
            ParseError::NumberTooLarge(2)
        );
    }
}
