// Domain layer - Entities and pure rules shared by both panels
pub mod chat;
pub mod command;
pub mod meeting;
pub mod task;
pub mod timestamp;
