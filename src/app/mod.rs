pub mod context;
pub mod handler;
pub mod services;
