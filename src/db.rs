use sqlx::{migrate::Migrator, Pool, Postgres};

pub mod jobdb;
pub mod paymentdb;
pub mod projectdb;
pub mod store;
pub mod taskdb;
pub mod teamdb;
pub mod timelogdb;
pub mod userdb;
pub mod workerdb;

#[cfg(test)]
pub mod memory;

pub use jobdb::JobApplicationExt;
pub use paymentdb::PaymentExt;
pub use projectdb::ProjectExt;
pub use store::SiteStore;
pub use taskdb::TaskExt;
pub use teamdb::TeamExt;
pub use timelogdb::TimeLogExt;
pub use userdb::UserExt;
pub use workerdb::WorkerExt;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct DBClient {
    pool: Pool<Postgres>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }

    /// Applies pending migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }
}
