use crate::time_block::BlockRange;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Decides when two bookings of the same room on the same date collide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictRule {
    /// Collide when the start blocks are equal or the end blocks are equal.
    ///
    /// Bookings that overlap without sharing an endpoint do not collide.
    #[default]
    EndpointMatch,
    /// Collide when the inclusive block ranges share any block
    Overlap,
}

impl ConflictRule {
    pub fn collides(self, existing: &BlockRange, proposed: &BlockRange) -> bool {
        match self {
            Self::EndpointMatch => {
                existing.start == proposed.start || existing.end == proposed.end
            }
            Self::Overlap => existing.overlaps(proposed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConflictRuleError(pub String);

impl Display for ParseConflictRuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "unknown conflict rule `{}`, expected `endpoint` or `overlap`",
            self.0
        )
    }
}

impl std::error::Error for ParseConflictRuleError {}

impl FromStr for ConflictRule {
    type Err = ParseConflictRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "endpoint" | "endpoint_match" => Ok(Self::EndpointMatch),
            "overlap" => Ok(Self::Overlap),
            other => Err(ParseConflictRuleError(other.to_owned())),
        }
    }
}

impl Display for ConflictRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EndpointMatch => write!(f, "endpoint"),
            Self::Overlap => write!(f, "overlap"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ConflictRule;
    use crate::time_block::{BlockRange, TimeBlock::*};
    use std::str::FromStr;

    #[test]
    fn test_endpoint_match_rejects_shared_start_or_end() {
        let rule = ConflictRule::EndpointMatch;
        let existing = BlockRange::new(Block1, Block2);

        assert!(rule.collides(&existing, &BlockRange::new(Block1, Block2)));
        assert!(rule.collides(&existing, &BlockRange::new(Block1, Block5)));
        assert!(rule.collides(&existing, &BlockRange::new(Block2, Block2)));
    }

    #[test]
    fn test_endpoint_match_lets_interval_overlap_through() {
        let rule = ConflictRule::EndpointMatch;
        let existing = BlockRange::new(Block1, Block4);

        // Shares blocks 2..3 but neither endpoint
        assert!(!rule.collides(&existing, &BlockRange::new(Block2, Block3)));
        // Adjacent
        assert!(!rule.collides(&existing, &BlockRange::new(Block5, Block6)));
    }

    #[test]
    fn test_overlap_rejects_any_shared_block() {
        let rule = ConflictRule::Overlap;
        let existing = BlockRange::new(Block1, Block4);

        assert!(rule.collides(&existing, &BlockRange::new(Block2, Block3)));
        assert!(rule.collides(&existing, &BlockRange::new(Block4, Block6)));
        assert!(!rule.collides(&existing, &BlockRange::new(Block5, Block6)));
    }

    #[test]
    fn test_conflict_rule_from_str() {
        assert_eq!(
            ConflictRule::from_str("endpoint").unwrap(),
            ConflictRule::EndpointMatch
        );
        assert_eq!(
            ConflictRule::from_str(" Overlap ").unwrap(),
            ConflictRule::Overlap
        );
        assert!(ConflictRule::from_str("strict").is_err());
        assert_eq!(ConflictRule::default().to_string(), "endpoint");
    }
}
