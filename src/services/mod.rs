pub mod connection_db;
pub mod database_service;
pub mod logger_service;
pub mod photo_service;
pub mod tag_service;
