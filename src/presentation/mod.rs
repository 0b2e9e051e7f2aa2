// Presentation layer - Text rendering and the interactive console
pub mod console;
pub mod render;
