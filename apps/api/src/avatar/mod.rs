// Landing-section avatar: upload, AI generation, reset.

pub mod handlers;
pub mod service;
