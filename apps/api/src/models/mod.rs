pub mod notice;
pub mod preferences;
pub mod repository;
