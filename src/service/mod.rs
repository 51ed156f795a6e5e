pub mod dashboard_service;
pub mod error;
pub mod job_service;
pub mod locks;
pub mod time_service;
