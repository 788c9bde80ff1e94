// src/api/http/mod.rs

pub mod chat;
pub mod exercise;
pub mod handlers;
pub mod image;
pub mod router;
pub mod speech;
