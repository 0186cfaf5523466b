pub mod config;
pub mod dtos;
pub mod error;
pub mod models;
pub mod services;
pub mod spec;

pub use error::AppError;
