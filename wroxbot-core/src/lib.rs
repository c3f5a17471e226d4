// src/lib.rs

pub mod db;
pub mod repositories;
pub mod platforms;
pub mod tasks;
pub mod services;
pub mod utils;
pub mod test_utils;

pub use db::Database;
pub use wroxbot_common::error::Error;
