//! Numeric literals: `digits ('.' digits)? ('e' '-'? digits)?`, where digits may contain `_`

use crate::lexer::token_parsing::digits_len;
use crate::lexer::{LexResult, Lexer, LexingError};
use ktpp_diagnostics::Severity;
use ktpp_tokens::{LiteralKind, LiteralValue, Token};
use tracing::trace;

impl<'a> Lexer<'a> {
    pub(super) fn number(&mut self) -> LexResult<Token> {
        let mantissa = self.digits().ok_or(LexingError::InvalidNumber)?;
        let mut is_float = false;

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.digits();
            is_float = true;
            if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                return Err(LexingError::InvalidFloat);
            }
        }

        let mut power = 0_i64;
        if self.peek() == Some('e') {
            self.advance();
            let negative = self.peek() == Some('-');
            if negative {
                self.advance();
                if self.peek() == Some('-') {
                    self.advance();
                    return Err(LexingError::MultipleNegatives);
                }
            }
            let exponent = self.digits().ok_or(LexingError::InvalidNumber)?;
            power = accumulate(exponent).unwrap_or(i64::MAX);
            if negative {
                power = -power;
            }
            if power == 0 {
                self.report(Severity::Warn, "Number literal with power of 0");
            }
        }

        let lexeme = self.lexeme();
        let value = if is_float || power < 0 {
            let cleaned = lexeme.replace('_', "");
            let value = cleaned
                .parse::<f64>()
                .map_err(|_| LexingError::InvalidNumber)?;
            LiteralValue::Float(value)
        } else {
            let scale = u32::try_from(power)
                .ok()
                .and_then(|power| 10_i64.checked_pow(power))
                .ok_or(LexingError::IntegerOverflow)?;
            let value = accumulate(mantissa)
                .and_then(|mantissa| mantissa.checked_mul(scale))
                .ok_or(LexingError::IntegerOverflow)?;
            LiteralValue::Int(value)
        };
        trace!("scanned number {lexeme:?} as {value:?}");

        let kind = match value {
            LiteralValue::Float(_) => LiteralKind::Float,
            _ => LiteralKind::Int,
        };
        Ok(self.make_token(kind.into(), value))
    }

    /// Consumes a run of digits and separators, returning it
    fn digits(&mut self) -> Option<&'a str> {
        let start = self.current;
        let len = digits_len(self.rest())?;
        self.current += len;
        let source: &'a str = self.source;
        Some(&source[start..self.current])
    }
}

/// Accumulates base 10 digits, skipping `_` separators. `None` on overflow.
fn accumulate(digits: &str) -> Option<i64> {
    digits
        .bytes()
        .filter(|b| *b != b'_')
        .try_fold(0_i64, |acc, digit| {
            acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
        })
}
