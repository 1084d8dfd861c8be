pub mod gemini;
pub mod memory;
pub mod sqlite;
