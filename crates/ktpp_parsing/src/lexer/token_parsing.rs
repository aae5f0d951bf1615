//! nom recognizers for the runs of characters that make up words and numbers

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, digit1};
use nom::combinator::recognize;
use nom::error::Error;
use nom::multi::many0_count;
use nom::sequence::pair;
use nom::IResult;

type Result<'a, O> = IResult<&'a str, O, Error<&'a str>>;

/// Recognizes `[A-Za-z_][A-Za-z0-9_]*`
pub fn recognize_identifier(input: &str) -> Result<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// Recognizes a run of decimal digits that may contain `_` separators, starting with a digit
pub fn recognize_digits(input: &str) -> Result<'_, &str> {
    recognize(pair(digit1, many0_count(alt((digit1, tag("_"))))))(input)
}

/// Gets the length of the identifier at the start of `input`, if there is one
pub fn identifier_len(input: &str) -> Option<usize> {
    recognize_identifier(input).ok().map(|(_, id)| id.len())
}

/// Gets the length of the digit run at the start of `input`, if there is one
pub fn digits_len(input: &str) -> Option<usize> {
    recognize_digits(input).ok().map(|(_, digits)| digits.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_letter_identifier() {
        let (rest, parsed) = recognize_identifier("i ").unwrap();
        assert_eq!(parsed, "i");
        assert_eq!(rest, " ");
    }

    #[test]
    fn test_identifier_with_underscores() {
        assert_eq!(identifier_len("_foo_1bar+"), Some(9));
        assert_eq!(identifier_len("1abc"), None);
        assert_eq!(identifier_len("\u{e9}t\u{e9}"), None);
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits_len("1_234e5"), Some(5));
        assert_eq!(digits_len("123."), Some(3));
        assert_eq!(digits_len("_1"), None);
    }
}
