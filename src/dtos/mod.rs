pub mod dashboarddtos;
pub mod jobdtos;
pub mod paymentdtos;
pub mod projectdtos;
pub mod taskdtos;
pub mod teamdtos;
pub mod userdtos;
pub mod workerdtos;

use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;

use crate::error::HttpError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }

    /// A recoverable condition the caller should be told about, not an error.
    pub fn info(message: &str, data: Option<T>) -> Self {
        Self {
            status: "info".to_string(),
            message: message.to_string(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn done(message: &str) -> Self {
        ApiResponse {
            status: "success".to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

/// Converts a validated, non-negative amount into a two-decimal money value.
pub fn to_money(amount: f64) -> Result<BigDecimal, HttpError> {
    BigDecimal::try_from(amount)
        .map(|value| value.round(2))
        .map_err(|_| HttpError::bad_request(format!("Invalid amount: {}", amount)))
}

/// Treats an absent or blank form value as "not provided".
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_to_money_rounds_to_cents() {
        assert_eq!(to_money(1500.5).unwrap(), BigDecimal::from_str("1500.50").unwrap());
        assert_eq!(to_money(0.1).unwrap(), BigDecimal::from_str("0.10").unwrap());
        assert!(to_money(f64::NAN).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Site A ".to_string())), Some("Site A".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
