pub mod app;
pub mod commands;
pub mod config;
pub mod controller;
pub mod errors;
pub mod external;
pub mod interaction;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod view;
