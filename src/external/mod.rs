pub mod dashboard_api;
pub mod http_api;

#[cfg(test)]
pub mod stub;
