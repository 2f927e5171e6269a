//! Scramble generation for the daily cubing challenge.
//!
//! This crate produces randomized move sequences for every puzzle the
//! challenge rotates through. The scheduler passes a puzzle tag and posts
//! the returned string inside a code block.

pub mod constraints;
pub mod error;
pub mod generator;
pub mod message;
pub mod puzzle;
pub mod random;
pub mod validate;

// Re-export main types
pub use error::{Result, ScrambleError};
pub use generator::{
    generate_for_tag, generate_scramble, FallbackPolicy, GeneratorConfig, Scramble,
};
pub use message::{challenge_body, extract_scramble};
pub use puzzle::{Face, Grammar, Modifier, Move, PuzzleType};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use validate::{is_valid_scramble, validate_scramble, ScrambleMetrics};
