use log::{debug, info};
use std::collections::BTreeSet;

use crate::config::*;
use crate::median::tie_adjusted_median;

/// The split of the respondents into the low and high cohorts.
///
/// Respondents without a valid answer to the pivot question are in neither set.
#[derive(PartialEq, Debug, Clone)]
pub struct Cohorts {
    pub low: BTreeSet<usize>,
    pub high: BTreeSet<usize>,
    /// The tie-adjusted median of the valid pivot answers, 0 if there are none.
    pub pivot_median: f64,
}

impl Cohorts {
    pub fn cohort_of(&self, respondent: usize) -> Option<Cohort> {
        if self.low.contains(&respondent) {
            Some(Cohort::Low)
        } else if self.high.contains(&respondent) {
            Some(Cohort::High)
        } else {
            None
        }
    }

    pub fn members(&self, cohort: Cohort) -> &BTreeSet<usize> {
        match cohort {
            Cohort::Low => &self.low,
            Cohort::High => &self.high,
        }
    }
}

/// Splits the respondents on their answer to the pivot question.
///
/// A respondent whose answer is at or below the tie-adjusted median of all
/// the valid answers is in the low cohort, strictly above it in the high
/// cohort.
pub fn partition(pivot_responses: &[f64], rules: &SurveyRules) -> Cohorts {
    let answers: Vec<Option<f64>> = (0..pivot_responses.len())
        .map(|idx| rules.valid_at(pivot_responses, idx))
        .collect();
    let valid: Vec<f64> = answers.iter().flatten().cloned().collect();
    let pivot_median = tie_adjusted_median(&valid, None);
    debug!(
        "partition: {} valid pivot answers out of {}, pivot median: {}",
        valid.len(),
        pivot_responses.len(),
        pivot_median
    );

    let mut low: BTreeSet<usize> = BTreeSet::new();
    let mut high: BTreeSet<usize> = BTreeSet::new();
    for (idx, answer) in answers.iter().enumerate() {
        match answer {
            Some(v) if *v <= pivot_median => {
                low.insert(idx);
            }
            Some(_) => {
                high.insert(idx);
            }
            None => {}
        }
    }
    info!(
        "partition: pivot median {}: {} low, {} high, {} without a valid answer",
        pivot_median,
        low.len(),
        high.len(),
        pivot_responses.len() - valid.len()
    );
    Cohorts {
        low,
        high,
        pivot_median,
    }
}
