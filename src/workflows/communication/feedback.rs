//! Rating aggregation for feedback and review summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::FeedbackEntry;

const RATING_MAX: f32 = 5.0;

/// Arithmetic mean of category ratings, each clamped to the five-point
/// scale. An empty map averages to zero.
pub fn average_rating(categories: &BTreeMap<String, f32>) -> f32 {
    if categories.is_empty() {
        return 0.0;
    }
    let sum: f32 = categories
        .values()
        .map(|rating| rating.clamp(0.0, RATING_MAX))
        .sum();
    sum / categories.len() as f32
}

/// Five-slot star strip for a rating. The fractional part renders as a half
/// star once it reaches the 0.5 boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f32) -> Self {
        let rating = rating.clamp(0.0, RATING_MAX);
        let full = rating.floor() as u8;
        let half = rating - rating.floor() >= 0.5;
        Self {
            full,
            half,
            empty: 5 - full - u8::from(half),
        }
    }
}

/// Aggregate view over a set of feedback entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub entries: usize,
    pub average: f32,
    pub stars: StarRating,
    pub per_category: BTreeMap<String, f32>,
    /// How many entries round to each star, one through five.
    pub distribution: [usize; 5],
}

pub fn summarize(entries: &[FeedbackEntry]) -> FeedbackSummary {
    let mut per_category: BTreeMap<String, Vec<f32>> = BTreeMap::new();
    let mut distribution = [0usize; 5];
    let mut total = 0.0_f32;

    for entry in entries {
        let average = average_rating(&entry.categories);
        total += average;
        let bucket = (average.round() as usize).clamp(1, 5);
        distribution[bucket - 1] += 1;

        for (category, rating) in &entry.categories {
            per_category
                .entry(category.clone())
                .or_default()
                .push(rating.clamp(0.0, RATING_MAX));
        }
    }

    let average = if entries.is_empty() {
        0.0
    } else {
        total / entries.len() as f32
    };

    FeedbackSummary {
        entries: entries.len(),
        average,
        stars: StarRating::from_rating(average),
        per_category: per_category
            .into_iter()
            .map(|(category, ratings)| {
                let mean = ratings.iter().sum::<f32>() / ratings.len() as f32;
                (category, mean)
            })
            .collect(),
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(pairs: &[(&str, f32)]) -> BTreeMap<String, f32> {
        pairs
            .iter()
            .map(|(name, rating)| (name.to_string(), *rating))
            .collect()
    }

    #[test]
    fn average_is_the_mean_of_clamped_categories() {
        let map = categories(&[("Mentorship", 5.0), ("Work Environment", 4.0), ("Overall", 4.4)]);
        let average = average_rating(&map);
        assert!((average - 4.466_667).abs() < 1e-5);

        let clamped = categories(&[("Mentorship", 9.0)]);
        assert_eq!(average_rating(&clamped), 5.0);

        assert_eq!(average_rating(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn half_star_buckets_at_the_half_boundary() {
        let below = StarRating::from_rating(4.4);
        assert_eq!((below.full, below.half, below.empty), (4, false, 1));

        let at = StarRating::from_rating(4.5);
        assert_eq!((at.full, at.half, at.empty), (4, true, 0));

        let top = StarRating::from_rating(5.0);
        assert_eq!((top.full, top.half, top.empty), (5, false, 0));

        let floor = StarRating::from_rating(0.0);
        assert_eq!((floor.full, floor.half, floor.empty), (0, false, 5));
    }

    #[test]
    fn summary_buckets_entries_by_rounded_rating() {
        let entries = vec![
            FeedbackEntry::sample("Alex Johnson", &[("Overall", 4.5)]),
            FeedbackEntry::sample("Emily Rodriguez", &[("Overall", 4.2)]),
            FeedbackEntry::sample("Sarah Wilson", &[("Overall", 2.0)]),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.distribution, [0, 1, 0, 1, 1]);
        assert!((summary.average - 3.566_667).abs() < 1e-5);
        assert_eq!(summary.per_category.len(), 1);
    }
}
