use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Income.
    Received,
    /// Expense.
    Paid,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "payment_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    ClientPayment,
    WorkerWages,
    Materials,
    Equipment,
    Transport,
    Utilities,
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Cancelled,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Completed
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Mpesa,
    Bank,
    Cheque,
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Mpesa
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub payment_type: PaymentType,
    pub category: PaymentCategory,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payment_type: PaymentType,
    pub category: PaymentCategory,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub reference: Option<String>,
}
