//! Terminal Boundary
//!
//! Line input and text output. The game logic never touches stdin or stdout
//! directly, so tests drive it through an in-memory console.

pub mod console;

pub use console::{Console, MemoryOutput, spawn_stdin_reader};
