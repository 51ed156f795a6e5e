use super::{
    JobApplicationExt, PaymentExt, ProjectExt, TaskExt, TeamExt, TimeLogExt, UserExt, WorkerExt,
};

/// Everything the services need from persistence, usable as `Arc<dyn SiteStore>`.
pub trait SiteStore:
    UserExt
    + ProjectExt
    + WorkerExt
    + PaymentExt
    + TaskExt
    + TeamExt
    + JobApplicationExt
    + TimeLogExt
    + Send
    + Sync
{
}

impl<T> SiteStore for T where
    T: UserExt
        + ProjectExt
        + WorkerExt
        + PaymentExt
        + TaskExt
        + TeamExt
        + JobApplicationExt
        + TimeLogExt
        + Send
        + Sync
{
}
