use crate::domain::model::{CategoryRow, SalesRow, CATEGORY_COUNT};
use crate::utils::error::{Result, SandwichError};

pub const DELIMITER: char = ',';

/// Parses an operator line like `10,20,30,40,50,60` into a sales row.
///
/// Tokens are trimmed before parsing, so `10, 20 ,30,40,50,60` is accepted.
/// Every token is parsed before the count is checked, so `1,x` reports the
/// bad token rather than the count.
///
/// Tokens use Rust integer syntax: an optional sign and ASCII digits only.
/// Digit-group underscores such as `1_000` are rejected, as are values
/// outside the `i64` range.
pub fn validate(raw: &str) -> Result<SalesRow> {
    let values = raw
        .split(DELIMITER)
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|_| SandwichError::ParseError {
                    token: token.to_string(),
                    position: index + 1,
                })
        })
        .collect::<Result<Vec<i64>>>()?;

    let values: [i64; CATEGORY_COUNT] =
        values
            .as_slice()
            .try_into()
            .map_err(|_| SandwichError::CountError {
                expected: CATEGORY_COUNT,
                actual: values.len(),
            })?;

    Ok(CategoryRow::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_six_integers_in_order() {
        let row = validate("10,20,30,40,50,60").unwrap();
        assert_eq!(row.values(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_trims_whitespace_around_tokens() {
        let row = validate(" 1, 2 ,3 ,4,  5,6 \n").unwrap();
        assert_eq!(row.values(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_accepts_negative_and_signed_values() {
        let row = validate("-3,+4,0,7,-1,2").unwrap();
        assert_eq!(row.values(), &[-3, 4, 0, 7, -1, 2]);
    }

    #[test]
    fn test_too_few_values_is_count_error() {
        match validate("1,2,3") {
            Err(SandwichError::CountError { expected, actual }) => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 3);
            }
            other => panic!("expected count error, got {other:?}"),
        }
    }

    #[test]
    fn test_too_many_values_is_count_error() {
        assert!(matches!(
            validate("1,2,3,4,5,6,7"),
            Err(SandwichError::CountError { actual: 7, .. })
        ));
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        assert!(matches!(
            validate(""),
            Err(SandwichError::ParseError { position: 1, .. })
        ));
    }

    #[test]
    fn test_non_integer_token_is_parse_error() {
        match validate("1,2,three,4,5,6") {
            Err(SandwichError::ParseError { token, position }) => {
                assert_eq!(token, "three");
                assert_eq!(position, 3);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(validate("1,2,3.5,4,5,6").is_err());
        assert!(validate("1,2,,4,5,6").is_err());
    }

    #[test]
    fn test_parse_error_takes_precedence_over_count() {
        assert!(matches!(
            validate("1,x"),
            Err(SandwichError::ParseError { .. })
        ));
    }

    #[test]
    fn test_digit_group_underscores_are_rejected() {
        match validate("1_000,2,3,4,5,6") {
            Err(SandwichError::ParseError { token, position }) => {
                assert_eq!(token, "1_000");
                assert_eq!(position, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_i64_bounds() {
        let row = validate("-9223372036854775808,9223372036854775807,0,0,0,0").unwrap();
        assert_eq!(row.values()[0], i64::MIN);
        assert_eq!(row.values()[1], i64::MAX);
        assert!(matches!(
            validate("9223372036854775808,0,0,0,0,0"),
            Err(SandwichError::ParseError { position: 1, .. })
        ));
    }
}
