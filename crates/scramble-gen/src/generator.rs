//! Scramble generators for every supported puzzle type.
//!
//! Face-turning puzzles share one selection loop: each slot draws a face
//! from the candidates left by the adjacency rules, then draws a modifier.
//! Pyraminx appends tip twists after the loop and Clock has its own
//! pin/dial grammar.

use std::fmt;

use rand::rngs::StdRng;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::constraints::{candidate_faces, Lookback, MoveRules};
use crate::error::Result;
use crate::puzzle::{
    ClockPins, DialTurn, Grammar, Move, PinState, PuzzleType, CLOCK_REORIENTATION,
    DIAL_OFFSETS, DIAL_POSITIONS, TWIST_MODIFIERS,
};
use crate::random::{pick, RandomSource, RngSource};

/// What to do with a puzzle tag that names no known puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Log a warning and scramble a 3x3 instead
    #[default]
    Lenient,
    /// Return `ScrambleError::UnknownPuzzleType`
    Strict,
}

/// Configuration for scramble generation
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub fallback: FallbackPolicy,
    /// Seed for reproducible output; entropy when unset
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Random source matching this configuration
    pub fn source(&self) -> RngSource<StdRng> {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }
}

/// A generated scramble together with the puzzle it was made for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scramble {
    pub puzzle: PuzzleType,
    #[serde(rename = "scramble")]
    pub text: String,
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Moves of one scramble, inline for every supported length
pub type MoveBuffer = SmallVec<[Move; 32]>;

/// Generate a scramble string for `puzzle`
pub fn generate_scramble<S: RandomSource + ?Sized>(
    puzzle: PuzzleType,
    source: &mut S,
) -> Result<String> {
    let text = match puzzle.grammar() {
        Grammar::Faces(rules) => render_moves(&select_moves(&rules, source)?),
        Grammar::FacesWithTips(rules) => generate_with_tips(&rules, source)?,
        Grammar::Clock => generate_clock(source)?,
    };

    debug!(
        puzzle = %puzzle,
        tokens = text.split_whitespace().count(),
        "generated scramble"
    );
    Ok(text)
}

/// Generate a scramble from a configuration tag.
///
/// Unknown tags follow `config.fallback`.
pub fn generate_for_tag<S: RandomSource + ?Sized>(
    tag: &str,
    config: &GeneratorConfig,
    source: &mut S,
) -> Result<Scramble> {
    let puzzle = match tag.parse::<PuzzleType>() {
        Ok(puzzle) => puzzle,
        Err(err) => match config.fallback {
            FallbackPolicy::Strict => return Err(err),
            FallbackPolicy::Lenient => {
                warn!(tag, fallback = %PuzzleType::Cube3, "unknown puzzle type");
                PuzzleType::Cube3
            }
        },
    };

    let text = generate_scramble(puzzle, source)?;
    Ok(Scramble { puzzle, text })
}

/// Run the selection loop for a face-turning puzzle.
///
/// Draws the length first when the rules allow a range, then one face and
/// one modifier per slot.
pub fn select_moves<S: RandomSource + ?Sized>(
    rules: &MoveRules,
    source: &mut S,
) -> Result<MoveBuffer> {
    let (min, max) = (*rules.length.start(), *rules.length.end());
    let length = if min == max {
        min
    } else {
        source.next_in_range(min as i64, max as i64)? as usize
    };

    let mut moves = MoveBuffer::new();
    let mut lookback = Lookback::default();

    while moves.len() < length {
        let candidates = candidate_faces(rules, &lookback);
        let face = pick(source, &candidates)?;
        let modifier = pick(source, rules.modifiers)?;

        moves.push(Move::new(face, modifier));
        lookback.push(face);
    }

    Ok(moves)
}

fn generate_with_tips<S: RandomSource + ?Sized>(
    rules: &MoveRules,
    source: &mut S,
) -> Result<String> {
    let mut moves = select_moves(rules, source)?;

    // 0 skips the tip, otherwise pick its modifier
    for &face in rules.alphabet {
        let roll = source.next_in_range(0, TWIST_MODIFIERS.len() as i64)?;
        if roll > 0 {
            moves.push(Move::tip(face, TWIST_MODIFIERS[roll as usize - 1]));
        }
    }

    Ok(render_moves(&moves))
}

fn generate_clock<S: RandomSource + ?Sized>(source: &mut S) -> Result<String> {
    let mut pins = [PinState::Up; 4];
    for pin in pins.iter_mut() {
        *pin = pick(source, &[PinState::Up, PinState::Down])?;
    }

    let mut tokens: Vec<String> = Vec::with_capacity(12);
    tokens.push(ClockPins(pins).to_string());
    dial_pass(source, &mut tokens)?;
    tokens.push(CLOCK_REORIENTATION.to_string());
    dial_pass(source, &mut tokens)?;

    Ok(tokens.join(" "))
}

fn dial_pass<S: RandomSource + ?Sized>(source: &mut S, tokens: &mut Vec<String>) -> Result<()> {
    for position in DIAL_POSITIONS {
        let hours = source.next_in_range(*DIAL_OFFSETS.start(), *DIAL_OFFSETS.end())?;
        tokens.push(DialTurn { position, hours }.to_string());
    }
    Ok(())
}

fn render_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
