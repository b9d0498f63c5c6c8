pub mod entity;
pub mod money;
pub mod repository;
