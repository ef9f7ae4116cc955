//! Tokenizer for calculator expressions.
//!
//! The accepted alphabet is closed: decimal literals, `+ - * / ^`,
//! parentheses, `π`, and the six function names, each immediately followed
//! by `(`. Anything else is rejected here, before parsing starts.

use super::error::CalcError;

/// Real-valued functions reachable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine, radians.
    Sin,
    /// Cosine, radians.
    Cos,
    /// Tangent, radians.
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    /// Square root.
    Sqrt,
}

impl Function {
    /// All functions, in keypad order.
    pub const ALL: [Self; 6] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
    ];

    /// The name as typed by the user.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
        }
    }

    /// Look up a function by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Decimal literal.
    Number(f64),
    /// The constant π.
    Pi,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Function name together with its opening parenthesis, e.g. `sin(`.
    Call(Function),
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Character offset in the source text.
    pub position: usize,
}

/// Split `input` into tokens. Whitespace is skipped.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                if literal.matches('.').count() > 1 {
                    return Err(CalcError::syntax(start, format!("malformed number '{literal}'")));
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::syntax(start, format!("malformed number '{literal}'")))?;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    position: start,
                });
                continue;
            }
            'a'..='z' | 'A'..='Z' => {
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let function = Function::from_name(&name)
                    .ok_or_else(|| CalcError::syntax(start, format!("unknown name '{name}'")))?;
                if chars.get(i) != Some(&'(') {
                    return Err(CalcError::syntax(i, format!("'{name}' must be followed by '('")));
                }
                i += 1;
                tokens.push(Spanned {
                    token: Token::Call(function),
                    position: start,
                });
                continue;
            }
            'π' => Token::Pi,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(CalcError::syntax(start, format!("unexpected character '{other}'")));
            }
        };

        tokens.push(Spanned {
            token,
            position: start,
        });
        i += 1;
    }

    Ok(tokens)
}
