//! Numeric helpers

use serde_json::Value as Json;

use super::args::Args;
use crate::error::{Result, TemplateError};
use crate::value::number_to_json;

/// `float64 "2.5"` parses a string as a 64-bit float
pub(super) fn float64(args: &Args<'_>) -> Result<Json> {
    let input = args.str(0)?;
    let n: f64 = input.trim().parse().map_err(|e: std::num::ParseFloatError| TemplateError::NumberParse {
        input: input.to_string(),
        message: e.to_string(),
    })?;
    Ok(number_to_json(n))
}

/// `money 12.5` formats a number as dollars with two decimals
pub(super) fn money(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(format!("${:.2}", args.f64(0)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float64() {
        assert_eq!(float64(&Args::new("float64", &[json!("2.5")])).unwrap(), json!(2.5));
        assert_eq!(float64(&Args::new("float64", &[json!(" 42 ")])).unwrap(), json!(42));
    }

    #[test]
    fn test_float64_parse_failure() {
        let err = float64(&Args::new("float64", &[json!("three")])).unwrap_err();
        assert!(matches!(err, TemplateError::NumberParse { ref input, .. } if input == "three"));
    }

    #[test]
    fn test_money() {
        assert_eq!(money(&Args::new("money", &[json!(1234.5)])).unwrap(), json!("$1234.50"));
        assert_eq!(money(&Args::new("money", &[json!(3)])).unwrap(), json!("$3.00"));
    }

    #[test]
    fn test_money_rejects_string() {
        let err = money(&Args::new("money", &[json!("3.5")])).unwrap_err();
        assert_eq!(err.kind(), "type-mismatch");
    }
}
