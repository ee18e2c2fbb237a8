/*!
Descriptive statistics for Likert-scale surveys, split by cohort.

The respondents are divided into two cohorts by their answer to a pivot
question (for example "Students like me are represented in my major"):
the ones at or below the median answer and the ones above it. Every
question is then summarised with a tie-adjusted median for the whole
population and for each cohort, ranked within each population, and the
two cohorts are compared in a summary.

```
use likert_stats::*;

let mut dataset = ResponseDataset::new();
dataset.insert("question1", vec![6.0, 5.0, 4.0, 2.0]);
dataset.insert("question7", vec![4.0, 5.0, 3.0, 6.0]);

let res = run_survey_stats(&dataset, "question7", &SurveyRules::DEFAULT_RULES, None)?;
assert_eq!(res.pivot_median, 4.5);
assert_eq!(res.ranked[0].stats.low_median, 5.0);
assert_eq!(res.ranked[0].stats.high_median, 3.5);
# Ok::<(), SurveyError>(())
```
*/

mod cohort;
mod config;
mod median;
mod ranking;
mod stats;
mod summary;

pub mod builder;
pub mod manual;
pub mod question_map;

use log::info;
use snafu::OptionExt;

pub use crate::cohort::{partition, Cohorts};
pub use crate::config::*;
pub use crate::median::{interpolated_median, tie_adjusted_median};
pub use crate::ranking::{rank_by, rank_grouped_stats};
pub use crate::stats::compute_grouped_stats;
pub use crate::summary::summarize;

use crate::question_map::QuestionKeyMap;

/// Runs the full analysis of a dataset.
///
/// Arguments:
/// * `dataset` the responses, one column per question
/// * `pivot_key` the question that splits the respondents into cohorts
/// * `rules` the rules for validity, ranking and the summary
/// * `labels` the question texts, used when ties are broken by text
pub fn run_survey_stats(
    dataset: &ResponseDataset,
    pivot_key: &str,
    rules: &SurveyRules,
    labels: Option<&QuestionKeyMap>,
) -> Result<SurveyResult, SurveyError> {
    info!(
        "Processing {:?} questions, {:?} respondents, pivot: {:?}, rules: {:?}",
        dataset.len(),
        dataset.num_respondents(),
        pivot_key,
        rules
    );
    let pivot = dataset.get(pivot_key).context(MissingPivotQuestionSnafu {
        key: pivot_key.to_string(),
    })?;
    let cohorts = partition(pivot, rules);
    let grouped = stats::grouped_stats_for_cohorts(dataset, &cohorts, rules);
    let ranked = rank_grouped_stats(&grouped, rules, labels);
    let summary = summarize(&ranked, rules);
    Ok(SurveyResult {
        pivot_median: cohorts.pivot_median,
        respondents: dataset.num_respondents(),
        low_count: cohorts.low.len(),
        high_count: cohorts.high.len(),
        ranked,
        summary,
    })
}
