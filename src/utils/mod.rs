pub mod error_handler;
pub mod password;
pub mod response_handler;
