//! Arithmetic expression evaluator
//!
//! Recursive descent over `+ - * /` (also `× ÷ −`), unary signs, parentheses
//! and decimal literals. The percent form "X% of Y" is handled separately.

use crate::tool::ArithmeticError;
use crate::types::round_to;

const PERCENT_OF: &str = "% of";

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

/// True when the expression starts with an operator and needs a left operand
pub fn is_relative(expr: &str) -> bool {
    matches!(
        expr.trim_start().chars().next(),
        Some('+' | '-' | '*' | '/' | '×' | '÷' | '−')
    )
}

/// Evaluate an expression.
///
/// Percent expressions are exact; everything else is rounded to one decimal.
pub fn evaluate(expr: &str) -> Result<f64, ArithmeticError> {
    let trimmed = expr.trim();
    if let Some((share, base)) = trimmed.split_once(PERCENT_OF) {
        let share = literal(share, expr)?;
        let base = literal(base, expr)?;
        return Ok(share / 100.0 * base);
    }

    let tokens = tokenize(trimmed)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        source: expr,
    };
    let value = parser.expression()?;
    if parser.pos != tokens.len() {
        return Err(malformed(expr, "unexpected trailing input"));
    }
    Ok(round_to(value, 1))
}

/// Apply relative operations such as "+ 10 and * 2" to `base`, one at a time
pub fn apply_relative(base: f64, expr: &str) -> Result<f64, ArithmeticError> {
    expr.split(" and ")
        .map(str::trim)
        .filter(|op| !op.is_empty())
        .try_fold(base, |value, op| evaluate(&format!("{} {}", value, op)))
}

fn malformed(expr: &str, reason: impl Into<String>) -> ArithmeticError {
    ArithmeticError::Malformed {
        expr: expr.to_string(),
        reason: reason.into(),
    }
}

fn literal(text: &str, expr: &str) -> Result<f64, ArithmeticError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| malformed(expr, format!("'{}' is not a number", text.trim())))
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ArithmeticError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' | '−' => Token::Minus,
            '*' | '×' => Token::Star,
            '/' | '÷' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Number(literal(&expr[start..end], expr)?)
            }
            other => return Err(malformed(expr, format!("unexpected character '{}'", other))),
        };
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(malformed(expr, "empty expression"));
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ArithmeticError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, ArithmeticError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, ArithmeticError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ArithmeticError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(malformed(self.source, "missing closing parenthesis")),
                }
            }
            Some(other) => Err(malformed(self.source, format!("unexpected {:?}", other))),
            None => Err(malformed(self.source, "unexpected end of expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("8 / 2"), Ok(4.0));
        assert_eq!(evaluate("3 / 1.5"), Ok(2.0));
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(evaluate("-3 + 5"), Ok(2.0));
        assert_eq!(evaluate("6 × 7 − 2"), Ok(40.0));
    }

    #[test]
    fn test_results_rounded_to_one_decimal() {
        assert_eq!(evaluate("10 / 3"), Ok(3.3));
        assert_eq!(evaluate("1 / 4"), Ok(0.3));
    }

    #[test]
    fn test_percent_is_exact() {
        assert_eq!(evaluate("12.5% of 243"), Ok(30.375));
        assert!(matches!(
            evaluate("abc% of 10"),
            Err(ArithmeticError::Malformed { .. })
        ));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("8 / 0"), Err(ArithmeticError::DivisionByZero));
        assert_eq!(evaluate("0 / 0"), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn test_malformed_input() {
        for expr in ["", "foo + bar", "2 +", "(1 + 2", "1 2", "1..2 + 1"] {
            assert!(
                matches!(evaluate(expr), Err(ArithmeticError::Malformed { .. })),
                "{:?}",
                expr
            );
        }
    }

    #[test]
    fn test_relative_expressions() {
        assert!(is_relative("+ 10"));
        assert!(is_relative(" / 2"));
        assert!(!is_relative("8 / 2"));

        assert_eq!(apply_relative(17.5, "+ 10"), Ok(27.5));
        assert_eq!(
            apply_relative(24.0, "+ 10 and * 2 and * 4 and / 2"),
            Ok(136.0)
        );
        assert_eq!(apply_relative(5.0, "/ 0"), Err(ArithmeticError::DivisionByZero));
    }
}
