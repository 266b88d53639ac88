//! Repeating page refresh jobs.
//!
//! Each job is registered with the job scheduler on a fixed interval and
//! re-renders one page region. A job whose region is not mounted on the
//! current page does nothing. Failures are logged and never alert the user.

pub mod dashboard_stats_job;
pub mod holdings_refresh_job;
