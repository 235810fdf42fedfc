pub mod error;
pub mod health;
pub mod plan;
pub mod recommendation;
pub mod tags;
