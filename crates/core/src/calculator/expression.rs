//! Restricted-grammar parser and evaluator.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := ('+' | '-') unary | power
//! power      := primary ('^' unary)?
//! primary    := NUMBER | 'π' | '(' expression ')' | FUNCTION '(' expression ')'
//! ```
//!
//! `^` is right-associative and binds tighter than a unary sign on its left,
//! so `-2^2` is `-4` and `2^-1` is `0.5`.

use std::f64::consts::PI;

use super::error::{CalcError, DomainError};
use super::token::{Function, Spanned, Token, tokenize};

/// Nesting limit for parentheses, unary signs and exponents.
const MAX_DEPTH: usize = 256;

/// Longest accepted expression, in tokens. Bounds the depth of the tree.
const MAX_TOKENS: usize = 4096;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation.
    Pow,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value (including π).
    Number(f64),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Function application.
    Call {
        /// Function.
        function: Function,
        /// Argument.
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree.
    ///
    /// Every intermediate value is checked, so overflow and domain errors are
    /// reported where they happen rather than surfacing as `inf`/`NaN`.
    pub fn eval(&self) -> Result<f64, CalcError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Neg(inner) => -inner.eval()?,
            Self::Binary { op, lhs, rhs } => apply_binary(*op, lhs.eval()?, rhs.eval()?)?,
            Self::Call { function, arg } => apply_function(*function, arg.eval()?)?,
        };
        check_finite(value)
    }
}

fn check_finite(value: f64) -> Result<f64, CalcError> {
    if value.is_nan() {
        Err(DomainError::ComplexPower.into())
    } else if value.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(value)
    }
}

fn apply_binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Sub => Ok(lhs - rhs),
        BinaryOp::Mul => Ok(lhs * rhs),
        BinaryOp::Div => {
            if rhs == 0.0 {
                Err(DomainError::DivisionByZero.into())
            } else {
                Ok(lhs / rhs)
            }
        }
        BinaryOp::Pow => {
            if lhs == 0.0 && rhs < 0.0 {
                Err(DomainError::DivisionByZero.into())
            } else if lhs < 0.0 && rhs.fract() != 0.0 {
                Err(DomainError::ComplexPower.into())
            } else {
                Ok(lhs.powf(rhs))
            }
        }
    }
}

fn apply_function(function: Function, arg: f64) -> Result<f64, CalcError> {
    match function {
        Function::Sin => Ok(arg.sin()),
        Function::Cos => Ok(arg.cos()),
        Function::Tan => Ok(arg.tan()),
        Function::Sqrt if arg < 0.0 => Err(DomainError::NegativeSqrt.into()),
        Function::Sqrt => Ok(arg.sqrt()),
        Function::Log | Function::Ln if arg <= 0.0 => Err(DomainError::NonPositiveLog.into()),
        Function::Log => Ok(arg.log10()),
        Function::Ln => Ok(arg.ln()),
    }
}

/// Parse `input` into an expression tree.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    let end = input.chars().count();
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        end,
    };

    if tokens.is_empty() {
        return Err(CalcError::syntax(0, "empty expression"));
    }
    if tokens.len() > MAX_TOKENS {
        return Err(CalcError::syntax(tokens[MAX_TOKENS].position, "expression too long"));
    }

    let expr = parser.expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(Token::RParen) => Err(CalcError::syntax(parser.position(), "unbalanced ')'")),
        Some(_) => Err(CalcError::syntax(parser.position(), "expected an operator")),
    }
}

/// Parse and evaluate `input`.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    parse(input)?.eval()
}

/// Format a result the way the display shows it.
///
/// Uses the shortest representation that parses back to the same value, so
/// a displayed result can be extended into a new expression.
#[must_use]
pub fn format_result(value: f64) -> String {
    // Adding positive zero turns -0.0 into 0.0
    (value + 0.0).to_string()
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    end: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|s| s.token)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax(self.position(), "expression nested too deeply"));
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        while let Some(op) = match self.peek() {
            Some(Token::Plus) => Some(BinaryOp::Add),
            Some(Token::Minus) => Some(BinaryOp::Sub),
            _ => None,
        } {
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        while let Some(op) = match self.peek() {
            Some(Token::Star) => Some(BinaryOp::Mul),
            Some(Token::Slash) => Some(BinaryOp::Div),
            _ => None,
        } {
            self.advance();
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Caret) {
            self.advance();
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let position = self.position();
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Pi) => Ok(Expr::Number(PI)),
            Some(Token::LParen) => self.parenthesized(),
            Some(Token::Call(function)) => {
                let arg = self.parenthesized()?;
                Ok(Expr::Call {
                    function,
                    arg: Box::new(arg),
                })
            }
            Some(Token::RParen) => Err(CalcError::syntax(position, "unexpected ')'")),
            Some(_) => Err(CalcError::syntax(position, "expected a number")),
            None => Err(CalcError::syntax(position, "unexpected end of expression")),
        }
    }

    /// Body of a group whose `(` has already been consumed.
    fn parenthesized(&mut self) -> Result<Expr, CalcError> {
        self.descend()?;
        let inner = self.expression()?;
        if self.peek() != Some(Token::RParen) {
            return Err(CalcError::syntax(self.position(), "missing ')'"));
        }
        self.advance();
        self.depth -= 1;
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
    }

    #[rstest]
    #[case("2+3*4", 14.0)]
    #[case("(2+3)*4", 20.0)]
    #[case("10/4", 2.5)]
    #[case("2^3^2", 512.0)]
    #[case("-2^2", -4.0)]
    #[case("2^-1", 0.5)]
    #[case("--3", 3.0)]
    #[case("+4-1", 3.0)]
    #[case("8-3-2", 3.0)]
    #[case("16/4/2", 2.0)]
    #[case("sqrt(16)+1", 5.0)]
    #[case("log(1000)", 3.0)]
    #[case("ln(1)", 0.0)]
    #[case("cos(0)*5", 5.0)]
    #[case("sin(π/2)", 1.0)]
    #[case("2*π", 2.0 * PI)]
    #[case(" 1 + 2 ", 3.0)]
    #[case("(-2)^3", -8.0)]
    fn test_evaluates(#[case] input: &str, #[case] expected: f64) {
        let value = evaluate(input).unwrap();
        assert!(approx(value, expected), "{input} = {value}, expected {expected}");
    }

    #[rstest]
    #[case("1/0", DomainError::DivisionByZero)]
    #[case("5/(2-2)", DomainError::DivisionByZero)]
    #[case("0^-1", DomainError::DivisionByZero)]
    #[case("sqrt(-1)", DomainError::NegativeSqrt)]
    #[case("log(0)", DomainError::NonPositiveLog)]
    #[case("ln(-3)", DomainError::NonPositiveLog)]
    #[case("(-8)^0.5", DomainError::ComplexPower)]
    fn test_domain_errors(#[case] input: &str, #[case] expected: DomainError) {
        assert_eq!(evaluate(input), Err(CalcError::Domain(expected)));
    }

    #[rstest]
    #[case("")]
    #[case("1+")]
    #[case("*2")]
    #[case("(1+2")]
    #[case("1+2)")]
    #[case("()")]
    #[case("2π")]
    #[case("2(3)")]
    #[case("sin()")]
    #[case("1//2")]
    #[case("2**3")]
    #[case("abs(1)")]
    fn test_syntax_errors(#[case] input: &str) {
        assert!(
            matches!(evaluate(input), Err(CalcError::Syntax { .. })),
            "{input} should be a syntax error"
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(evaluate("10^400"), Err(CalcError::Overflow));
        let big = format!("1{}", "0".repeat(400));
        assert_eq!(evaluate(&big), Err(CalcError::Overflow));
    }

    #[test]
    fn test_deep_nesting_is_rejected_not_fatal() {
        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(evaluate(&deep), Err(CalcError::Syntax { .. })));

        let signs = format!("{}1", "-".repeat(10_000));
        assert!(matches!(evaluate(&signs), Err(CalcError::Syntax { .. })));

        let tower = format!("{}2", "2^".repeat(200));
        assert!(matches!(evaluate(&tower), Err(CalcError::Overflow)));

        let long_sum = format!("1{}", "+1".repeat(5_000));
        assert!(matches!(evaluate(&long_sum), Err(CalcError::Syntax { .. })));
    }

    #[test]
    fn test_syntax_error_positions() {
        assert_eq!(
            evaluate("1+2)"),
            Err(CalcError::syntax(3, "unbalanced ')'"))
        );
        assert_eq!(
            evaluate("(1+2"),
            Err(CalcError::syntax(4, "missing ')'"))
        );
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(-3.25), "-3.25");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_formatted_results_parse_back() {
        for input in ["1/3", "-7/2", "2^60", "0.000001*3"] {
            let value = evaluate(input).unwrap();
            let again = evaluate(&format_result(value)).unwrap();
            assert_eq!(value.to_bits(), again.to_bits(), "{input}");
        }
    }
}
