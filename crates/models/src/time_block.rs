use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the ten fixed teaching slots of a day
///
/// Variants are declared in chronological order, so the derived `Ord`
/// follows the order of the day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum TimeBlock {
    #[default]
    #[serde(rename = "BLOCK_1")]
    #[strum(to_string = "BLOCK_1")]
    Block1,
    #[serde(rename = "BLOCK_2")]
    #[strum(to_string = "BLOCK_2")]
    Block2,
    #[serde(rename = "BLOCK_3")]
    #[strum(to_string = "BLOCK_3")]
    Block3,
    #[serde(rename = "BLOCK_4")]
    #[strum(to_string = "BLOCK_4")]
    Block4,
    #[serde(rename = "BLOCK_5")]
    #[strum(to_string = "BLOCK_5")]
    Block5,
    #[serde(rename = "BLOCK_6")]
    #[strum(to_string = "BLOCK_6")]
    Block6,
    #[serde(rename = "BLOCK_7")]
    #[strum(to_string = "BLOCK_7")]
    Block7,
    #[serde(rename = "BLOCK_8")]
    #[strum(to_string = "BLOCK_8")]
    Block8,
    #[serde(rename = "BLOCK_9")]
    #[strum(to_string = "BLOCK_9")]
    Block9,
    #[serde(rename = "BLOCK_10")]
    #[strum(to_string = "BLOCK_10")]
    Block10,
}

impl TimeBlock {
    /// All blocks in chronological order
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// 1-based position of the block within the day
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

/// An inclusive `[start, end]` range of blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: TimeBlock,
    pub end: TimeBlock,
}

impl BlockRange {
    pub fn new(start: TimeBlock, end: TimeBlock) -> Self {
        Self { start, end }
    }

    /// A range is well formed when it does not end before it starts
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Whether the two ranges share at least one block
    pub fn overlaps(&self, other: &BlockRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[cfg(test)]
mod test {
    use super::{BlockRange, TimeBlock};
    use std::str::FromStr;

    #[test]
    fn test_time_block_round_trips_through_strings() {
        assert_eq!(TimeBlock::from_str("BLOCK_7").unwrap(), TimeBlock::Block7);
        assert_eq!(TimeBlock::Block10.to_string(), "BLOCK_10");
        assert!(TimeBlock::from_str("BLOCK_11").is_err());
    }

    #[test]
    fn test_time_block_serde_uses_wire_names() {
        let json = serde_json::to_string(&TimeBlock::Block3).unwrap();
        assert_eq!(json, "\"BLOCK_3\"");

        let parsed: TimeBlock = serde_json::from_str("\"BLOCK_9\"").unwrap();
        assert_eq!(parsed, TimeBlock::Block9);
    }

    #[test]
    fn test_time_block_ordering_follows_the_day() {
        let blocks: Vec<_> = TimeBlock::all().collect();
        assert_eq!(blocks.len(), 10);
        assert!(blocks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(TimeBlock::Block1.number(), 1);
        assert_eq!(TimeBlock::Block10.number(), 10);
    }

    #[test]
    fn test_block_range_overlap() {
        let morning = BlockRange::new(TimeBlock::Block1, TimeBlock::Block3);
        let late_morning = BlockRange::new(TimeBlock::Block3, TimeBlock::Block4);
        let afternoon = BlockRange::new(TimeBlock::Block5, TimeBlock::Block6);

        assert!(morning.overlaps(&late_morning));
        assert!(late_morning.overlaps(&morning));
        assert!(!morning.overlaps(&afternoon));
        assert!(!BlockRange::new(TimeBlock::Block4, TimeBlock::Block2).is_ordered());
    }
}
