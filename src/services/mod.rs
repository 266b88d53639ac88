pub mod forecasting_service;
pub mod indicators;
pub mod job_scheduler_service;
pub mod request_tokens;
