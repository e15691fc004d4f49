//! Auswertung numerischer Eingaben (Länge, Winkel, Radius) aus der
//! Befehlszeile.
//!
//! Grammatik (rekursiver Abstieg):
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | '+' unary | power
//! power  := atom ('^' unary)?
//! atom   := number | ident | ident '(' expr ')' | '(' expr ')'
//! ```
//! Bekannte Konstanten: `pi`, `e`. Funktionen: `sin`, `cos`, `tan`,
//! `asin`, `acos`, `atan`, `sqrt`, `abs`, `ln`, `log` (Winkel in Grad).
//! Die Verschachtelungstiefe ist auf [`MAX_DEPTH`] begrenzt.

use thiserror::Error;

/// Maximale Verschachtelungstiefe (Vorzeichen, Klammern, Exponenten).
pub const MAX_DEPTH: usize = 256;

/// Fehler bei der Auswertung eines Ausdrucks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("leerer Ausdruck")]
    Empty,
    #[error("unerwartetes Zeichen '{0}' an Position {1}")]
    UnexpectedChar(char, usize),
    #[error("unerwartetes Ende des Ausdrucks")]
    UnexpectedEnd,
    #[error("unbekannter Bezeichner '{0}'")]
    UnknownIdentifier(String),
    #[error("ungültige Zahl '{0}'")]
    InvalidNumber(String),
    #[error("Ergebnis ist keine endliche Zahl")]
    NotFinite,
    #[error("Ausdruck zu tief verschachtelt (maximal {MAX_DEPTH} Ebenen)")]
    TooDeep,
}

/// Wertet einen Ausdruck zu einer Gleitkommazahl aus.
pub fn evaluate(input: &str) -> Result<f64, ExpressionError> {
    let tokens: Vec<char> = input.chars().collect();
    if tokens.iter().all(|c| c.is_whitespace()) {
        return Err(ExpressionError::Empty);
    }
    let mut parser = Parser {
        chars: tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if let Some(c) = parser.peek() {
        return Err(ExpressionError::UnexpectedChar(c, parser.pos));
    }
    if !value.is_finite() {
        return Err(ExpressionError::NotFinite);
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Nächstes Nicht-Leerzeichen, falls es `c` ist.
    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            if self.eat('*') {
                value *= self.unary()?;
            } else if self.eat('/') {
                value /= self.unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    /// Jede Rekursion (Vorzeichen, Klammer, Funktion, Exponent) läuft
    /// über `unary`, daher wird die Tiefe nur hier gezählt.
    fn unary(&mut self) -> Result<f64, ExpressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, ExpressionError> {
        if self.eat('-') {
            return Ok(-self.unary()?);
        }
        if self.eat('+') {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<f64, ExpressionError> {
        let base = self.atom()?;
        if self.eat('^') {
            // rechtsassoziativ
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, ExpressionError> {
        self.skip_ws();
        match self.peek() {
            None => Err(ExpressionError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                if !self.eat(')') {
                    return match self.peek() {
                        Some(c) => Err(ExpressionError::UnexpectedChar(c, self.pos)),
                        None => Err(ExpressionError::UnexpectedEnd),
                    };
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() => self.identifier(),
            Some(c) => Err(ExpressionError::UnexpectedChar(c, self.pos)),
        }
    }

    fn number(&mut self) -> Result<f64, ExpressionError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        // Exponent (1e-3)
        if matches!(self.peek(), Some('e' | 'E'))
            && self
                .chars
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit() || *c == '-' || *c == '+')
        {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map_err(|_| ExpressionError::InvalidNumber(text))
    }

    fn identifier(&mut self) -> Result<f64, ExpressionError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect::<String>().to_lowercase();
        match name.as_str() {
            "pi" => return Ok(std::f64::consts::PI),
            "e" => return Ok(std::f64::consts::E),
            _ => {}
        }
        let func: fn(f64) -> f64 = match name.as_str() {
            "sin" => |x: f64| x.to_radians().sin(),
            "cos" => |x: f64| x.to_radians().cos(),
            "tan" => |x: f64| x.to_radians().tan(),
            "asin" => |x: f64| x.asin().to_degrees(),
            "acos" => |x: f64| x.acos().to_degrees(),
            "atan" => |x: f64| x.atan().to_degrees(),
            "sqrt" => f64::sqrt,
            "abs" => f64::abs,
            "ln" => f64::ln,
            "log" => f64::log10,
            _ => return Err(ExpressionError::UnknownIdentifier(name)),
        };
        if !self.eat('(') {
            return Err(match self.peek() {
                Some(c) => ExpressionError::UnexpectedChar(c, self.pos),
                None => ExpressionError::UnexpectedEnd,
            });
        }
        let arg = self.expr()?;
        if !self.eat(')') {
            return Err(ExpressionError::UnexpectedEnd);
        }
        Ok(func(arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn arithmetic_with_precedence() {
        assert_eq!(evaluate("1 + 2 * 3"), Ok(7.0));
        assert_eq!(evaluate("(1 + 2) * 3"), Ok(9.0));
        assert_eq!(evaluate("-2^2"), Ok(-4.0));
        assert_eq!(evaluate("2^3^2"), Ok(512.0));
        assert_eq!(evaluate("1.5e2"), Ok(150.0));
    }

    #[test]
    fn functions_use_degrees() {
        assert_abs_diff_eq!(evaluate("sin(30)").expect("Wert erwartet"), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(evaluate("atan(1)").expect("Wert erwartet"), 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(evaluate("sqrt(2)*sqrt(2)").expect("Wert erwartet"), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn errors_are_reported() {
        assert_eq!(evaluate("   "), Err(ExpressionError::Empty));
        assert_eq!(evaluate("1 +"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(evaluate("abc"), Err(ExpressionError::UnknownIdentifier("abc".into())));
        assert_eq!(evaluate("1 / 0"), Err(ExpressionError::NotFinite));
        assert!(matches!(evaluate("2 $ 3"), Err(ExpressionError::UnexpectedChar('$', 2))));
        assert!(matches!(evaluate("1..2"), Err(ExpressionError::InvalidNumber(_))));
    }

    #[test]
    fn deep_nesting_is_rejected_without_overflow() {
        let signs = format!("{}1", "-".repeat(100_000));
        assert_eq!(evaluate(&signs), Err(ExpressionError::TooDeep));

        let parens = "(".repeat(100_000);
        assert_eq!(evaluate(&parens), Err(ExpressionError::TooDeep));

        let powers = vec!["2"; 100_000].join("^");
        assert_eq!(evaluate(&powers), Err(ExpressionError::TooDeep));
    }

    #[test]
    fn nesting_below_limit_is_accepted() {
        let depth = MAX_DEPTH / 2;
        let nested = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(evaluate(&nested), Ok(7.0));
        assert_eq!(evaluate(&format!("{}1", "-".repeat(100))), Ok(1.0));
    }
}
