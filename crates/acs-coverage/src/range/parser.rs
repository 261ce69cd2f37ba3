//! Free-text range parsing.
//!
//! Input is what a coordinator types into the "covered blocks" field:
//! `"1-13, 15; 20-22"`. Anything that does not read as a unit number or a
//! `start-end` range is skipped and the rest of the text is still used.

use super::UnitSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a token contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not an integer or `integer-integer`
    Malformed,
    /// Range with `start > end`
    Reversed,
    /// Well-formed, but no value falls inside `[1, total]`
    OutOfBounds,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Malformed => "malformed",
            Self::Reversed => "reversed range",
            Self::OutOfBounds => "out of bounds",
        };
        f.write_str(text)
    }
}

/// A token that was dropped during parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedToken {
    /// Token text after trimming
    pub token: String,
    /// Reason it was skipped
    pub reason: SkipReason,
}

/// Parsed units plus diagnostics for the skipped tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Units considered covered
    pub units: UnitSet,
    /// Tokens that contributed nothing, in input order
    pub skipped: Vec<SkippedToken>,
    /// Number of non-empty tokens seen
    pub token_count: usize,
}

impl ParseOutcome {
    /// True when text was entered but not a single unit came out of it.
    ///
    /// This is the "check your input" hint for the owning form.
    #[must_use]
    pub fn looks_wrong(&self) -> bool {
        self.token_count > 0 && self.units.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Single(i64),
    Span(i64, i64),
}

fn classify(token: &str) -> Result<Token, SkipReason> {
    if let Some((start, end)) = token.split_once('-') {
        let start = start.trim().parse::<i64>().map_err(|_| SkipReason::Malformed)?;
        let end = end.trim().parse::<i64>().map_err(|_| SkipReason::Malformed)?;
        if start > end {
            return Err(SkipReason::Reversed);
        }
        Ok(Token::Span(start, end))
    } else {
        token
            .parse::<i64>()
            .map(Token::Single)
            .map_err(|_| SkipReason::Malformed)
    }
}

/// Upper bound usable as a `u32` unit index
fn unit_bound(total_units: i64) -> u32 {
    u32::try_from(total_units).unwrap_or(u32::MAX)
}

/// Parse range text into units bounded by `[1, total_units]`, keeping
/// diagnostics about every skipped token.
#[must_use]
pub fn parse_detailed(range_text: &str, total_units: i64) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    if range_text.trim().is_empty() || total_units <= 0 {
        return outcome;
    }
    let bound = i64::from(unit_bound(total_units));

    for token in range_text
        .split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        outcome.token_count += 1;

        let (start, end) = match classify(token) {
            Ok(Token::Single(v)) => (v, v),
            Ok(Token::Span(s, e)) => (s, e),
            Err(reason) => {
                outcome.skipped.push(SkippedToken {
                    token: token.to_string(),
                    reason,
                });
                continue;
            }
        };

        // Clamp the iteration window, never the values themselves
        let lo = start.max(1);
        let hi = end.min(bound);
        if lo > hi {
            outcome.skipped.push(SkippedToken {
                token: token.to_string(),
                reason: SkipReason::OutOfBounds,
            });
            continue;
        }
        outcome.units.insert_range(lo as u32..=hi as u32);
    }

    outcome
}

/// Parse range text into the set of covered units.
///
/// Tokens are separated by `,` or `;`. Malformed, reversed and out-of-range
/// entries contribute nothing; values outside `[1, total_units]` are dropped
/// rather than clamped. Never fails.
///
/// ```
/// use acs_coverage::range::parse_units;
///
/// let units = parse_units("1-5, 3-8; abc", 10);
/// assert_eq!(units.len(), 8);
/// assert_eq!(units.to_range_text(), "1-8");
/// ```
#[must_use]
pub fn parse_units(range_text: &str, total_units: i64) -> UnitSet {
    parse_detailed(range_text, total_units).units
}
