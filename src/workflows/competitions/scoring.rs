//! Rubric arithmetic for submission reviews.

use serde::{Deserialize, Deserializer, Serialize};

/// Ceiling for each rubric dimension.
pub const RUBRIC_DIMENSION_MAX: u8 = 10;
/// Ceiling for a submission total (three dimensions).
pub const RUBRIC_TOTAL_MAX: u8 = 30;

/// A reviewer's rubric for one submission. Every dimension is clamped to
/// `0..=10` at construction and at deserialization, so out-of-range input
/// stores as the ceiling rather than failing the review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScore {
    #[serde(deserialize_with = "clamped_dimension")]
    technical: u8,
    #[serde(deserialize_with = "clamped_dimension")]
    design: u8,
    #[serde(deserialize_with = "clamped_dimension")]
    innovation: u8,
}

fn clamped_dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = u64::deserialize(deserializer)?;
    Ok(raw.min(RUBRIC_DIMENSION_MAX as u64) as u8)
}

impl RubricScore {
    pub fn new(technical: u8, design: u8, innovation: u8) -> Self {
        Self {
            technical: technical.min(RUBRIC_DIMENSION_MAX),
            design: design.min(RUBRIC_DIMENSION_MAX),
            innovation: innovation.min(RUBRIC_DIMENSION_MAX),
        }
    }

    pub fn technical(&self) -> u8 {
        self.technical
    }

    pub fn design(&self) -> u8 {
        self.design
    }

    pub fn innovation(&self) -> u8 {
        self.innovation
    }

    /// Sum of the three dimensions, at most [`RUBRIC_TOTAL_MAX`].
    pub fn total(&self) -> u8 {
        self.technical + self.design + self.innovation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn a_perfect_rubric_totals_thirty() {
        assert_eq!(RubricScore::new(10, 10, 10).total(), RUBRIC_TOTAL_MAX);
    }

    #[test]
    fn dimensions_are_clamped_at_construction() {
        let score = RubricScore::new(15, 3, 7);
        assert_eq!(score.technical(), 10);
        assert_eq!(score.total(), 20);
    }

    #[test]
    fn dimensions_are_clamped_at_deserialization() {
        let score: RubricScore =
            serde_json::from_value(json!({ "technical": 99, "design": 4, "innovation": 0 }))
                .expect("score decodes");
        assert_eq!(score.technical(), 10);
        assert_eq!(score.design(), 4);
        assert_eq!(score.innovation(), 0);
        assert_eq!(score.total(), 14);
    }

    #[test]
    fn zero_rubric_is_valid() {
        assert_eq!(RubricScore::new(0, 0, 0).total(), 0);
    }
}
