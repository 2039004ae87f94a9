pub mod authentication;
pub mod credentials;
pub mod error;
pub mod records;
pub mod session;
