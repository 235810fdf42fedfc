pub mod client;
pub mod plan {
    pub mod entity;
    pub mod repository;
}
