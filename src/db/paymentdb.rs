use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::paymentmodel::{NewPayment, Payment};

const PAYMENT_COLUMNS: &str = r#"
    id, user_id, payment_type, category, amount, description, payment_date,
    status, payment_method, reference, created_at, updated_at
"#;

#[async_trait]
pub trait PaymentExt {
    async fn create_payment(
        &self,
        user_id: Uuid,
        payment: NewPayment,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, sqlx::Error>;

    /// Newest payment date first; undated payments last.
    async fn get_user_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, sqlx::Error>;

    async fn get_payments(&self) -> Result<Vec<Payment>, sqlx::Error>;

    async fn delete_payment(&self, payment_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_payment(
        &self,
        user_id: Uuid,
        payment: NewPayment,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO payments
            (user_id, payment_type, category, amount, description, payment_date,
             status, payment_method, reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        );

        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(payment.payment_type)
            .bind(payment.category)
            .bind(payment.amount)
            .bind(payment.description)
            .bind(payment.payment_date)
            .bind(payment.status)
            .bind(payment.payment_method)
            .bind(payment.reference)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {} FROM payments WHERE id = $1", PAYMENT_COLUMNS);

        sqlx::query_as::<_, Payment>(&query)
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM payments
            WHERE user_id = $1
            ORDER BY payment_date DESC NULLS LAST, created_at DESC
            "#,
            PAYMENT_COLUMNS
        );

        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_payments(&self) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM payments ORDER BY payment_date DESC NULLS LAST, created_at DESC",
            PAYMENT_COLUMNS
        );

        sqlx::query_as::<_, Payment>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_payment(&self, payment_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(payment_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
