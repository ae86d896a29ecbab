//! Parsing of typed values from command-line arguments.

use thiserror::Error;

use crate::kv::{ParseKindError, Value, ValueKind};

/// Errors from turning command-line text into a [`Value`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgError {
    #[error("{kind} takes exactly one value, got {got}")]
    WrongArity { kind: ValueKind, got: usize },

    #[error("'{input}' is not a valid {kind} element")]
    InvalidNumber { input: String, kind: ValueKind },
}

/// Parse a kind name given on the command line.
///
/// Accepts any case and `-` in place of `_`, so `int-array` and
/// `INT_ARRAY` are equivalent.
pub fn parse_kind_arg(s: &str) -> Result<ValueKind, ParseKindError> {
    s.trim().to_ascii_uppercase().replace('-', "_").parse()
}

/// Build a value of `kind` from raw argument strings.
///
/// Scalar kinds take exactly one argument; array kinds take any number,
/// including none.
pub fn parse_values(kind: ValueKind, raw: &[String]) -> Result<Value, ArgError> {
    match kind {
        ValueKind::Int => single(kind, raw).and_then(|s| parse_number(kind, s).map(Value::Int)),
        ValueKind::Float => {
            single(kind, raw).and_then(|s| parse_number(kind, s).map(Value::Float))
        }
        ValueKind::String => single(kind, raw).map(Value::from),
        ValueKind::IntArray => raw
            .iter()
            .map(|s| parse_number(kind, s))
            .collect::<Result<Vec<i32>, _>>()
            .map(Value::IntArray),
        ValueKind::FloatArray => raw
            .iter()
            .map(|s| parse_number(kind, s))
            .collect::<Result<Vec<f32>, _>>()
            .map(Value::FloatArray),
        ValueKind::StringArray => Ok(Value::StringArray(raw.to_vec())),
    }
}

fn single(kind: ValueKind, raw: &[String]) -> Result<&str, ArgError> {
    match raw {
        [one] => Ok(one),
        _ => Err(ArgError::WrongArity {
            kind,
            got: raw.len(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(kind: ValueKind, s: &str) -> Result<T, ArgError> {
    s.trim().parse().map_err(|_| ArgError::InvalidNumber {
        input: s.to_string(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_kind_arg() {
        assert_eq!(parse_kind_arg("int"), Ok(ValueKind::Int));
        assert_eq!(parse_kind_arg("string-array"), Ok(ValueKind::StringArray));
        assert_eq!(parse_kind_arg("FLOAT_ARRAY"), Ok(ValueKind::FloatArray));
        assert!(parse_kind_arg("bool").is_err());
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_values(ValueKind::Int, &args(&["42"])), Ok(Value::Int(42)));
        assert_eq!(
            parse_values(ValueKind::Float, &args(&["0.5"])),
            Ok(Value::Float(0.5))
        );
        assert_eq!(
            parse_values(ValueKind::String, &args(&["Hello, World!"])),
            Ok(Value::from("Hello, World!"))
        );
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(
            parse_values(ValueKind::IntArray, &args(&["1", "2", "3"])),
            Ok(Value::from(vec![1, 2, 3]))
        );
        assert_eq!(
            parse_values(ValueKind::StringArray, &args(&["apple", "banana"])),
            Ok(Value::from(&["apple", "banana"][..]))
        );
        assert_eq!(
            parse_values(ValueKind::FloatArray, &[]),
            Ok(Value::FloatArray(Vec::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_values(ValueKind::Int, &args(&["1", "2"])),
            Err(ArgError::WrongArity {
                kind: ValueKind::Int,
                got: 2
            })
        );
        assert!(matches!(
            parse_values(ValueKind::IntArray, &args(&["1", "x"])),
            Err(ArgError::InvalidNumber { .. })
        ));
    }
}
