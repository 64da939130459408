//! Operand parsing, operator dispatch and number display

use crate::error::CalcError;

/// Arithmetic operator selected by the `op` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Parse an operator code (`add`, `sub`, `mul`, `div`)
    pub fn parse(code: &str) -> Result<Self, CalcError> {
        match code {
            "add" => Ok(Operator::Add),
            "sub" => Ok(Operator::Sub),
            "mul" => Ok(Operator::Mul),
            "div" => Ok(Operator::Div),
            _ => Err(CalcError::InvalidOperation),
        }
    }

    /// Symbol shown between the operands
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "\u{2212}",
            Operator::Mul => "\u{00d7}",
            Operator::Div => "\u{00f7}",
        }
    }
}

/// A validated calculation, ready to evaluate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    pub a: f64,
    pub b: f64,
    pub op: Operator,
}

/// Outcome of a successful evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub a: f64,
    pub b: f64,
    pub op: Operator,
    pub result: f64,
}

impl CalculationRequest {
    /// Validate the raw request parameters.
    ///
    /// Presence is checked first, then both operands, then the operator, so a
    /// bad number is reported even when the operator is also wrong.
    pub fn from_raw(
        a: Option<&str>,
        b: Option<&str>,
        op: Option<&str>,
    ) -> Result<Self, CalcError> {
        let (Some(a), Some(b), Some(op)) = (a, b, op) else {
            return Err(CalcError::MissingParameter);
        };

        let a = parse_operand(a)?;
        let b = parse_operand(b)?;
        let op = Operator::parse(op)?;

        Ok(CalculationRequest { a, b, op })
    }

    /// Evaluate the operation
    pub fn evaluate(&self) -> Result<Calculation, CalcError> {
        let result = match self.op {
            Operator::Add => self.a + self.b,
            Operator::Sub => self.a - self.b,
            Operator::Mul => self.a * self.b,
            Operator::Div => {
                if self.b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                self.a / self.b
            }
        };

        if !result.is_finite() {
            return Err(CalcError::Unexpected(
                "result is out of range".to_string(),
            ));
        }

        Ok(Calculation {
            a: self.a,
            b: self.b,
            op: self.op,
            result,
        })
    }
}

/// Parse, validate and evaluate in one step
pub fn calculate(
    a: Option<&str>,
    b: Option<&str>,
    op: Option<&str>,
) -> Result<Calculation, CalcError> {
    CalculationRequest::from_raw(a, b, op)?.evaluate()
}

fn parse_operand(raw: &str) -> Result<f64, CalcError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidNumber),
    }
}

/// Format a number for display: `2.0` prints as `2`, `0.5` stays `0.5`
pub fn format_number(x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() < 1e-10 {
        // -0.0 would otherwise print as "-0"
        if rounded == 0.0 {
            return "0".to_string();
        }
        // Full digits, no clamping to i64: 1e300 prints as 1 and 300 zeros
        return rounded.to_string();
    }
    x.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(a: &str, b: &str, op: &str) -> Result<Calculation, CalcError> {
        calculate(Some(a), Some(b), Some(op))
    }

    #[test]
    fn test_operator_parse() {
        assert_eq!(Operator::parse("add"), Ok(Operator::Add));
        assert_eq!(Operator::parse("div"), Ok(Operator::Div));
        assert_eq!(Operator::parse("ADD"), Err(CalcError::InvalidOperation));
        assert_eq!(Operator::parse("pow"), Err(CalcError::InvalidOperation));
    }

    #[test]
    fn test_four_operations() {
        assert_eq!(calc("12.5", "2.5", "add").unwrap().result, 15.0);
        assert_eq!(calc("10", "4", "sub").unwrap().result, 6.0);
        assert_eq!(calc("3", "-7", "mul").unwrap().result, -21.0);
        assert_eq!(calc("1", "4", "div").unwrap().result, 0.25);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(calc("1", "1", "add").unwrap().op.symbol(), "+");
        assert_eq!(calc("1", "1", "sub").unwrap().op.symbol(), "−");
        assert_eq!(calc("1", "1", "mul").unwrap().op.symbol(), "×");
        assert_eq!(calc("1", "1", "div").unwrap().op.symbol(), "÷");
    }

    #[test]
    fn test_operands_are_trimmed() {
        assert_eq!(calc("  7 ", "\t3\n", "add").unwrap().result, 10.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(calc("5", "0", "div"), Err(CalcError::DivisionByZero));
        assert_eq!(calc("0", "0", "div"), Err(CalcError::DivisionByZero));
        assert_eq!(calc("-3", "-0.0", "div"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_invalid_number_wins_over_invalid_operation() {
        assert_eq!(calc("abc", "1", "add"), Err(CalcError::InvalidNumber));
        assert_eq!(calc("1", "abc", "div"), Err(CalcError::InvalidNumber));
        assert_eq!(calc("abc", "1", "nope"), Err(CalcError::InvalidNumber));
        assert_eq!(calc("", "1", "add"), Err(CalcError::InvalidNumber));
    }

    #[test]
    fn test_non_finite_operands_rejected() {
        assert_eq!(calc("NaN", "1", "add"), Err(CalcError::InvalidNumber));
        assert_eq!(calc("1", "inf", "mul"), Err(CalcError::InvalidNumber));
    }

    #[test]
    fn test_overflow_is_unexpected() {
        assert!(matches!(
            calc("1e308", "10", "mul"),
            Err(CalcError::Unexpected(_))
        ));
    }

    #[test]
    fn test_invalid_operation() {
        assert_eq!(calc("1", "2", "mod"), Err(CalcError::InvalidOperation));
    }

    #[test]
    fn test_missing_parameters() {
        assert_eq!(
            calculate(Some("1"), Some("2"), None),
            Err(CalcError::MissingParameter)
        );
        assert_eq!(
            calculate(None, Some("x"), Some("add")),
            Err(CalcError::MissingParameter)
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-21.0), "-21");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(3.00000000000001), "3");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_format_large_integral_values() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e300), format!("1{}", "0".repeat(300)));
        assert_eq!(format_number(-1e19), "-10000000000000000000");
    }
}
