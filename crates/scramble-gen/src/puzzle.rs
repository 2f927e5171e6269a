//! Puzzle and move-token types.
//!
//! Puzzle tags serialize to the same strings the challenge scheduler stores
//! in its configuration (`"3x3"`, `"3x3 BLD"`, `"Clock"`, ...).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constraints::{AdjacencyRule, MoveRules};
use crate::error::ScrambleError;

/// Puzzle type - matches the challenge configuration tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleType {
    #[serde(rename = "3x3")]
    Cube3,
    #[serde(rename = "3x3 OH")]
    OneHanded,
    #[serde(rename = "3x3 BLD")]
    Blindfolded,
    #[serde(rename = "2x2")]
    Cube2,
    Pyraminx,
    Skewb,
    Clock,
}

impl PuzzleType {
    pub const ALL: [PuzzleType; 7] = [
        PuzzleType::Cube3,
        PuzzleType::OneHanded,
        PuzzleType::Blindfolded,
        PuzzleType::Cube2,
        PuzzleType::Pyraminx,
        PuzzleType::Skewb,
        PuzzleType::Clock,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PuzzleType::Cube3 => "3x3",
            PuzzleType::OneHanded => "3x3 OH",
            PuzzleType::Blindfolded => "3x3 BLD",
            PuzzleType::Cube2 => "2x2",
            PuzzleType::Pyraminx => "Pyraminx",
            PuzzleType::Skewb => "Skewb",
            PuzzleType::Clock => "Clock",
        }
    }

    /// Check if this puzzle uses the full 3x3 grammar (axis rule + lookback)
    pub fn is_cube_family(self) -> bool {
        matches!(
            self,
            PuzzleType::Cube3 | PuzzleType::OneHanded | PuzzleType::Blindfolded
        )
    }

    /// Move grammar used to generate and validate this puzzle's scrambles
    pub fn grammar(self) -> Grammar {
        let rule = if self.is_cube_family() {
            AdjacencyRule::AxisWithLookback
        } else {
            AdjacencyRule::DifferentFace
        };

        match self {
            PuzzleType::Cube3 | PuzzleType::OneHanded => Grammar::Faces(face_rules(
                &CUBE_FACES,
                &TURN_MODIFIERS,
                CUBE_LENGTH..=CUBE_LENGTH,
                rule,
            )),
            PuzzleType::Blindfolded => Grammar::Faces(face_rules(
                &CUBE_FACES,
                &TURN_MODIFIERS,
                BLD_LENGTH..=BLD_LENGTH,
                rule,
            )),
            PuzzleType::Cube2 => Grammar::Faces(face_rules(
                &TWO_BY_TWO_FACES,
                &TURN_MODIFIERS,
                TWO_BY_TWO_LENGTH..=TWO_BY_TWO_LENGTH,
                rule,
            )),
            PuzzleType::Skewb => Grammar::Faces(face_rules(
                &SKEWB_CORNERS,
                &TWIST_MODIFIERS,
                SKEWB_LENGTH..=SKEWB_LENGTH,
                rule,
            )),
            PuzzleType::Pyraminx => Grammar::FacesWithTips(face_rules(
                &PYRAMINX_FACES,
                &TWIST_MODIFIERS,
                PYRAMINX_LENGTH,
                rule,
            )),
            PuzzleType::Clock => Grammar::Clock,
        }
    }
}

/// Scramble grammar of a puzzle type
#[derive(Debug, Clone)]
pub enum Grammar {
    /// Face selection loop only
    Faces(MoveRules),
    /// Face selection loop followed by tip twists, in alphabet order
    FacesWithTips(MoveRules),
    /// Pin prefix and two dial passes
    Clock,
}

fn face_rules(
    alphabet: &'static [Face],
    modifiers: &'static [Modifier],
    length: RangeInclusive<usize>,
    rule: AdjacencyRule,
) -> MoveRules {
    MoveRules {
        alphabet,
        modifiers,
        length,
        rule,
    }
}

impl fmt::Display for PuzzleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PuzzleType {
    type Err = ScrambleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleType::ALL
            .into_iter()
            .find(|p| p.tag() == s)
            .ok_or_else(|| ScrambleError::UnknownPuzzleType(s.to_string()))
    }
}

pub const CUBE_LENGTH: usize = 20;
pub const BLD_LENGTH: usize = 25;
pub const TWO_BY_TWO_LENGTH: usize = 11;
pub const SKEWB_LENGTH: usize = 9;
pub const PYRAMINX_LENGTH: RangeInclusive<usize> = 8..=10;

/// Axis pairing two opposite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    UpDown,
    LeftRight,
    FrontBack,
}

/// Face, tip or corner identifier.
///
/// Every puzzle driven by the selection loop names its turnable parts with
/// a subset of these six letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::UpDown,
            Face::L | Face::R => Axis::LeftRight,
            Face::F | Face::B => Axis::FrontBack,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    /// Small-letter form used for Pyraminx tips
    pub fn tip_symbol(self) -> char {
        self.symbol().to_ascii_lowercase()
    }

    pub fn from_symbol(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }
}

pub const CUBE_FACES: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];
pub const TWO_BY_TWO_FACES: [Face; 3] = [Face::U, Face::R, Face::F];
pub const PYRAMINX_FACES: [Face; 4] = [Face::U, Face::L, Face::R, Face::B];
pub const SKEWB_CORNERS: [Face; 4] = [Face::U, Face::L, Face::R, Face::B];

/// Turn modifier rendered as a suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    None,
    Inverse,
    Double,
}

impl Modifier {
    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Inverse => "'",
            Modifier::Double => "2",
        }
    }

    pub fn from_suffix(s: &str) -> Option<Modifier> {
        match s {
            "" => Some(Modifier::None),
            "'" => Some(Modifier::Inverse),
            "2" => Some(Modifier::Double),
            _ => None,
        }
    }
}

pub const TURN_MODIFIERS: [Modifier; 3] = [Modifier::None, Modifier::Inverse, Modifier::Double];
pub const TWIST_MODIFIERS: [Modifier; 2] = [Modifier::None, Modifier::Inverse];

/// A single move token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
    pub tip: bool,
}

impl Move {
    pub fn new(face: Face, modifier: Modifier) -> Self {
        Self {
            face,
            modifier,
            tip: false,
        }
    }

    pub fn tip(face: Face, modifier: Modifier) -> Self {
        Self {
            face,
            modifier,
            tip: true,
        }
    }

    /// Parse a rendered token such as `R'`, `F2` or `u`
    pub fn parse(token: &str) -> Option<Move> {
        let mut chars = token.chars();
        let head = chars.next()?;
        let modifier = Modifier::from_suffix(chars.as_str())?;
        let face = Face::from_symbol(head.to_ascii_uppercase())?;
        Some(Move {
            face,
            modifier,
            tip: head.is_ascii_lowercase(),
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = if self.tip {
            self.face.tip_symbol()
        } else {
            self.face.symbol()
        };
        write!(f, "{}{}", symbol, self.modifier.suffix())
    }
}

/// Clock pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinState {
    Up,
    Down,
}

impl PinState {
    pub fn letter(self) -> char {
        match self {
            PinState::Up => 'U',
            PinState::Down => 'D',
        }
    }

    pub fn from_letter(c: &str) -> Option<PinState> {
        match c {
            "U" => Some(PinState::Up),
            "D" => Some(PinState::Down),
            _ => None,
        }
    }
}

/// Pin configuration set once at the start of a Clock scramble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockPins(pub [PinState; 4]);

impl ClockPins {
    /// Parse the `(U,D,U,U)` prefix token
    pub fn parse(token: &str) -> Option<ClockPins> {
        let inner = token.strip_prefix('(')?.strip_suffix(')')?;
        let mut pins = [PinState::Up; 4];
        let mut parts = inner.split(',');
        for pin in pins.iter_mut() {
            *pin = PinState::from_letter(parts.next()?)?;
        }
        if parts.next().is_some() {
            return None;
        }
        Some(ClockPins(pins))
    }
}

impl fmt::Display for ClockPins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(
            f,
            "({},{},{},{})",
            a.letter(),
            b.letter(),
            c.letter(),
            d.letter()
        )
    }
}

/// Named dial position on the Clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialPosition {
    UR,
    DR,
    DL,
    UL,
    All,
}

impl DialPosition {
    pub fn name(self) -> &'static str {
        match self {
            DialPosition::UR => "UR",
            DialPosition::DR => "DR",
            DialPosition::DL => "DL",
            DialPosition::UL => "UL",
            DialPosition::All => "ALL",
        }
    }
}

pub const DIAL_POSITIONS: [DialPosition; 5] = [
    DialPosition::UR,
    DialPosition::DR,
    DialPosition::DL,
    DialPosition::UL,
    DialPosition::All,
];

pub const DIAL_OFFSETS: RangeInclusive<i64> = -5..=6;

/// Whole-puzzle turn separating the front and back dial passes
pub const CLOCK_REORIENTATION: &str = "y2";

/// A dial rotation, e.g. `UR3+` or `ALL5-`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialTurn {
    pub position: DialPosition,
    pub hours: i64,
}

impl DialTurn {
    pub fn parse(token: &str) -> Option<DialTurn> {
        let position = DIAL_POSITIONS
            .into_iter()
            .find(|p| token.starts_with(p.name()))?;
        let rest = &token[position.name().len()..];
        let sign = rest.chars().last()?;
        let digits = &rest[..rest.len() - sign.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // only the rendered form, no leading zeros
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        let magnitude: i64 = digits.parse().ok()?;
        let hours = match sign {
            '+' => magnitude,
            '-' if magnitude > 0 => -magnitude,
            _ => return None,
        };
        Some(DialTurn { position, hours })
    }
}

impl fmt::Display for DialTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hours < 0 { '-' } else { '+' };
        write!(f, "{}{}{}", self.position.name(), self.hours.abs(), sign)
    }
}
