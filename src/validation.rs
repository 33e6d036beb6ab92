//! Input validation for the recommendation slots
//!
//! Rules-based checks, evaluated in a fixed order: age, then investment
//! amount, then risk level. The first failure is returned.

use crate::models::{Slot, ValidationResult};
use crate::recommendation::RiskTier;
use std::num::{IntErrorKind, ParseIntError};
use tracing::debug;

pub const MIN_AGE_EXCLUSIVE: i64 = 0;
pub const MAX_AGE: i64 = 65;
pub const MIN_INVESTMENT_AMOUNT: i64 = 5000;

/// Why a slot was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    LowAge,
    HighAge,
    NonNumericAge,
    InvestmentAmount,
    NonNumericInvestmentAmount,
    NoRisk,
    UnknownRisk,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::LowAge => "Sorry, unable to recommend due to age <= 0",
            ValidationError::HighAge => "Sorry, unable to recommend due to age > 65",
            ValidationError::NonNumericAge => {
                "Sorry, unable to recommend due to an age that is not a whole number"
            }
            ValidationError::InvestmentAmount => {
                "Sorry, unable to recommend due to insufficient investment amount"
            }
            ValidationError::NonNumericInvestmentAmount => {
                "Sorry, unable to recommend due to an investment amount that is not a whole number"
            }
            ValidationError::NoRisk => "Unable to recommend. No risk level provided.",
            ValidationError::UnknownRisk => {
                "Invalid risk level. Accepted Values: None, Low, Medium, High"
            }
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            ValidationError::LowAge
            | ValidationError::HighAge
            | ValidationError::NonNumericAge => Slot::Age,
            ValidationError::InvestmentAmount | ValidationError::NonNumericInvestmentAmount => {
                Slot::InvestmentAmount
            }
            ValidationError::NoRisk | ValidationError::UnknownRisk => Slot::RiskLevel,
        }
    }
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violated_slot: None,
            message: None,
        }
    }

    pub fn invalid(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            violated_slot: Some(error.slot()),
            message: Some(error.message().to_string()),
        }
    }
}

/// Whole numbers beyond `i64` saturate, so they still land on the right side of every bound.
fn parse_int(value: &str) -> Result<i64, ParseIntError> {
    match value.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(e),
        },
    }
}

fn check_age(age: &str) -> Option<ValidationError> {
    match parse_int(age) {
        Err(_) => Some(ValidationError::NonNumericAge),
        Ok(age) if age <= MIN_AGE_EXCLUSIVE => Some(ValidationError::LowAge),
        Ok(age) if age > MAX_AGE => Some(ValidationError::HighAge),
        Ok(_) => None,
    }
}

fn check_investment_amount(amount: &str) -> Option<ValidationError> {
    match parse_int(amount) {
        Err(_) => Some(ValidationError::NonNumericInvestmentAmount),
        Ok(amount) if amount < MIN_INVESTMENT_AMOUNT => Some(ValidationError::InvestmentAmount),
        Ok(_) => None,
    }
}

fn check_risk_level(risk_level: Option<&str>) -> Option<ValidationError> {
    match risk_level {
        None => Some(ValidationError::NoRisk),
        Some(risk) if RiskTier::parse(risk).is_none() => Some(ValidationError::UnknownRisk),
        Some(_) => None,
    }
}

/// Validate the numeric slots (when provided) and the risk level (always).
pub fn validate(
    age: Option<&str>,
    investment_amount: Option<&str>,
    risk_level: Option<&str>,
) -> ValidationResult {
    let failure = age
        .and_then(check_age)
        .or_else(|| investment_amount.and_then(check_investment_amount))
        .or_else(|| check_risk_level(risk_level));

    match failure {
        Some(error) => {
            debug!(violated_slot = %error.slot(), ?error, "Validation failed");
            ValidationResult::invalid(error)
        }
        None => ValidationResult::valid(),
    }
}
