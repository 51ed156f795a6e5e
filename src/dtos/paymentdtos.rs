use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use validator::Validate;

use crate::{
    dtos::{non_blank, to_money},
    error::HttpError,
    models::paymentmodel::{
        NewPayment, Payment, PaymentCategory, PaymentMethod, PaymentStatus, PaymentType,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePaymentDto {
    #[serde(rename = "type")]
    pub payment_type: PaymentType,

    pub category: PaymentCategory,

    #[validate(range(min = 0.0, max = 9999999999.99, message = "Amount must be a positive number"))]
    pub amount: f64,

    pub description: Option<String>,

    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub status: PaymentStatus,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[validate(length(max = 100, message = "Reference must be at most 100 characters"))]
    pub reference: Option<String>,
}

impl CreatePaymentDto {
    pub fn into_new_payment(self) -> Result<NewPayment, HttpError> {
        Ok(NewPayment {
            payment_type: self.payment_type,
            category: self.category,
            amount: to_money(self.amount)?,
            description: non_blank(self.description),
            payment_date: self.date,
            status: self.status,
            payment_method: self.payment_method,
            reference: non_blank(self.reference),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentsPageDto {
    pub payments: Vec<Payment>,
    pub total_received: BigDecimal,
    pub total_pending: BigDecimal,
    pub total_paid: BigDecimal,
    pub monthly_total: BigDecimal,
}
