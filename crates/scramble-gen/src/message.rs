//! Challenge message body handed to the chat layer.
//!
//! The scramble goes inside a fenced code block; the bot later splits the
//! posted message on the fence to read the scramble back.

use crate::generator::Scramble;

const FENCE: &str = "```";

/// Render the message body announcing a scramble
pub fn challenge_body(scramble: &Scramble) -> String {
    format!(
        "**{} scramble**\n{FENCE}\n{}\n{FENCE}",
        scramble.puzzle.tag(),
        scramble.text
    )
}

/// Text between the first pair of fences, trimmed
pub fn extract_scramble(body: &str) -> Option<&str> {
    let mut parts = body.split(FENCE);
    parts.next()?;
    let inner = parts.next()?;
    // an unterminated fence has no closing part
    parts.next()?;

    let text = inner.trim();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_scramble;
    use crate::puzzle::PuzzleType;
    use crate::random::RngSource;

    #[test]
    fn test_body_layout() {
        let scramble = Scramble {
            puzzle: PuzzleType::Skewb,
            text: "R U L' B R' U L B' R".to_string(),
        };
        assert_eq!(
            challenge_body(&scramble),
            "**Skewb scramble**\n```\nR U L' B R' U L B' R\n```"
        );
    }

    #[test]
    fn test_extract_round_trips_generated_scrambles() {
        let mut source = RngSource::seeded(17);
        for puzzle in PuzzleType::ALL {
            for _ in 0..100 {
                let text = generate_scramble(puzzle, &mut source).unwrap();
                let body = challenge_body(&Scramble {
                    puzzle,
                    text: text.clone(),
                });
                assert_eq!(extract_scramble(&body), Some(text.as_str()));
            }
        }
    }

    #[test]
    fn test_extract_without_fences() {
        assert_eq!(extract_scramble("no code block here"), None);
        assert_eq!(extract_scramble("```\nR U F"), None);
        assert_eq!(extract_scramble("``` \n ```"), None);
    }
}
