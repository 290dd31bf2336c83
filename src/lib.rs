pub mod backend;
pub mod client;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod models;
pub mod response;
pub mod store;

pub use client::ProductApi;
pub use error::{AppError, AppResult};
