pub mod dependency_injection;
pub mod error;
pub mod server;
pub mod shutdown;
