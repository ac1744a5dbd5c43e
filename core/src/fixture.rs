//! Literal input values used to probe the API.
//!
//! A `Fixture` is rendered two ways: as text for a path segment or query
//! value (percent-encoded by the client when the URL is built), and as a JSON
//! value when it travels in a request body.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query key or value.
const QUERY: &AsciiSet = &SEGMENT.add(b'&').add(b'=').add(b'+');

#[derive(Debug, Clone, PartialEq)]
pub enum Fixture {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// An integer too wide for `i64`, kept as its decimal digits. Serializes
    /// as a JSON string.
    BigInt(String),
}

impl Fixture {
    pub fn text(s: impl Into<String>) -> Self {
        Fixture::Text(s.into())
    }

    /// `base` raised to `exp`, exactly, as decimal digits.
    pub fn pow(base: u32, exp: u32) -> Self {
        let mut digits = vec![1u32];
        for _ in 0..exp {
            let mut carry = 0;
            for d in digits.iter_mut() {
                let v = *d * base + carry;
                *d = v % 10;
                carry = v / 10;
            }
            while carry > 0 {
                digits.push(carry % 10);
                carry /= 10;
            }
        }
        let s: String = digits
            .iter()
            .rev()
            .map(|d| char::from(b'0' + *d as u8))
            .collect();
        match s.parse::<i64>() {
            Ok(n) => Fixture::Int(n),
            Err(_) => Fixture::BigInt(s),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Fixture::Int(n) => Value::from(*n),
            Fixture::Float(f) => Value::from(*f),
            Fixture::Bool(b) => Value::Bool(*b),
            Fixture::Text(s) | Fixture::BigInt(s) => Value::String(s.clone()),
        }
    }

    pub(crate) fn path_segment(&self) -> String {
        utf8_percent_encode(&self.to_string(), SEGMENT).to_string()
    }

    pub(crate) fn query_value(&self) -> String {
        encode_query(&self.to_string())
    }
}

pub(crate) fn encode_query(s: &str) -> String {
    utf8_percent_encode(s, QUERY).to_string()
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fixture::Int(n) => write!(f, "{n}"),
            Fixture::Float(x) => write!(f, "{x}"),
            Fixture::Bool(b) => write!(f, "{b}"),
            Fixture::Text(s) | Fixture::BigInt(s) => f.write_str(s),
        }
    }
}

impl Serialize for Fixture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<i64> for Fixture {
    fn from(n: i64) -> Self {
        Fixture::Int(n)
    }
}

impl From<f64> for Fixture {
    fn from(x: f64) -> Self {
        Fixture::Float(x)
    }
}

impl From<bool> for Fixture {
    fn from(b: bool) -> Self {
        Fixture::Bool(b)
    }
}

impl From<&str> for Fixture {
    fn from(s: &str) -> Self {
        Fixture::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Fixture::Int(-1), "-1")]
    #[case(Fixture::Float(2.5), "2.5")]
    #[case(Fixture::Bool(true), "true")]
    #[case(Fixture::text("@"), "@")]
    #[case(Fixture::text(" "), "%20")]
    #[case(Fixture::text("тест"), "%D1%82%D0%B5%D1%81%D1%82")]
    #[case(Fixture::text("апи"), "%D0%B0%D0%BF%D0%B8")]
    #[case(Fixture::text("a/b"), "a%2Fb")]
    fn path_segment_encoding(#[case] fixture: Fixture, #[case] expected: &str) {
        assert_eq!(fixture.path_segment(), expected);
    }

    #[test]
    fn query_value_escapes_separators() {
        assert_eq!(Fixture::text("a&b=c+d").query_value(), "a%26b%3Dc%2Bd");
    }

    #[test]
    fn pow_stays_int_when_it_fits() {
        assert_eq!(Fixture::pow(200, 2), Fixture::Int(40_000));
        assert_eq!(Fixture::pow(10, 0), Fixture::Int(1));
    }

    #[test]
    fn pow_overflows_into_digits() {
        let Fixture::BigInt(digits) = Fixture::pow(200, 100) else {
            panic!("expected BigInt");
        };
        // 200^100 = 2^100 * 10^200
        assert_eq!(digits.len(), 231);
        assert_eq!(&digits[..31], (1u128 << 100).to_string());
        assert!(digits[31..].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn json_rendering_keeps_types() {
        assert_eq!(Fixture::Int(-9_999_999_999_999).to_json(), -9_999_999_999_999i64);
        assert_eq!(Fixture::Float(2.5).to_json(), 2.5);
        assert_eq!(Fixture::text("-").to_json(), "-");
    }
}
