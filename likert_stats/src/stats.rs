use log::{debug, info, warn};
use snafu::OptionExt;
use std::collections::BTreeSet;

use crate::cohort::{partition, Cohorts};
use crate::config::*;
use crate::median::tie_adjusted_median;

/// Computes the grouped statistics of every question in the dataset.
///
/// The respondents are split once on the pivot question, then each question
/// is summarised for all the respondents and for each cohort. Every
/// population is filtered independently: a respondent without a valid pivot
/// answer still counts towards `n`, and a respondent who skipped one question
/// still counts for the others.
///
/// The pivot question itself is part of the output. Questions are listed in
/// dataset order.
pub fn compute_grouped_stats(
    dataset: &ResponseDataset,
    pivot_key: &str,
    rules: &SurveyRules,
) -> Result<Vec<GroupedStats>, SurveyError> {
    let pivot = dataset.get(pivot_key).context(MissingPivotQuestionSnafu {
        key: pivot_key.to_string(),
    })?;
    let cohorts = partition(pivot, rules);
    Ok(grouped_stats_for_cohorts(dataset, &cohorts, rules))
}

pub(crate) fn grouped_stats_for_cohorts(
    dataset: &ResponseDataset,
    cohorts: &Cohorts,
    rules: &SurveyRules,
) -> Vec<GroupedStats> {
    let num_respondents = dataset.num_respondents();
    info!(
        "grouped_stats: {} questions, {} respondents",
        dataset.len(),
        num_respondents
    );

    let mut res: Vec<GroupedStats> = Vec::new();
    for (question_key, values) in dataset.iter() {
        if values.len() != num_respondents {
            warn!(
                "grouped_stats: question {:?} has {} responses for {} respondents, treating the rest as missing",
                question_key,
                values.len(),
                num_respondents
            );
        }
        let all: Vec<f64> = values
            .iter()
            .cloned()
            .filter(|v| rules.is_valid_response(*v))
            .collect();
        let low = valid_for(values, &cohorts.low, rules);
        let high = valid_for(values, &cohorts.high, rules);

        let stats = GroupedStats {
            question_key: question_key.to_string(),
            overall_median: tie_adjusted_median(&all, None),
            low_median: tie_adjusted_median(&low, None),
            high_median: tie_adjusted_median(&high, None),
            n: all.len(),
            low_n: low.len(),
            high_n: high.len(),
        };
        debug!("grouped_stats: {:?}", stats);
        res.push(stats);
    }
    res
}

fn valid_for(values: &[f64], members: &BTreeSet<usize>, rules: &SurveyRules) -> Vec<f64> {
    members
        .iter()
        .filter_map(|idx| rules.valid_at(values, *idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[(&str, &[f64])]) -> ResponseDataset {
        let mut ds = ResponseDataset::new();
        for (k, v) in columns {
            ds.insert(k, v.to_vec());
        }
        ds
    }

    fn find<'a>(stats: &'a [GroupedStats], key: &str) -> &'a GroupedStats {
        stats.iter().find(|s| s.question_key == key).unwrap()
    }

    #[test]
    fn missing_pivot_is_an_error() {
        let ds = dataset(&[("question1", &[5.0, 6.0])]);
        let res = compute_grouped_stats(&ds, "question7", &SurveyRules::DEFAULT_RULES);
        assert_eq!(
            res,
            Err(SurveyError::MissingPivotQuestion {
                key: "question7".to_string()
            })
        );
    }

    #[test]
    fn cohorts_from_the_pivot() {
        let ds = dataset(&[
            ("question1", &[6.0, 5.0, 4.0, 2.0]),
            ("question7", &[4.0, 5.0, 3.0, 6.0]),
        ]);
        let stats = compute_grouped_stats(&ds, "question7", &SurveyRules::DEFAULT_RULES).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].question_key, "question1");
        assert_eq!(stats[1].question_key, "question7");

        let q1 = find(&stats, "question1");
        assert_eq!(q1.overall_median, 4.5);
        // Low cohort is respondents 0 and 2, high cohort 1 and 3.
        assert_eq!(q1.low_median, 5.0);
        assert_eq!(q1.high_median, 3.5);
        assert_eq!((q1.n, q1.low_n, q1.high_n), (4, 2, 2));

        let q7 = find(&stats, "question7");
        assert_eq!(q7.low_median, 3.5);
        assert_eq!(q7.high_median, 5.5);
    }

    #[test]
    fn populations_are_filtered_independently() {
        let ds = dataset(&[
            ("question7", &[2.0, MISSING, 6.0, 0.0]),
            ("question2", &[MISSING, 4.0, 5.0, 3.0]),
        ]);
        let stats = compute_grouped_stats(&ds, "question7", &SurveyRules::DEFAULT_RULES).unwrap();
        let q2 = find(&stats, "question2");
        // Respondents 1 and 3 have no pivot answer but still count overall.
        assert_eq!(q2.n, 3);
        assert_eq!(q2.overall_median, 4.0);
        // Respondent 0 is low but skipped question2.
        assert_eq!((q2.low_n, q2.low_median), (0, 0.0));
        assert_eq!((q2.high_n, q2.high_median), (1, 5.0));
    }

    #[test]
    fn out_of_scale_answers_are_ignored() {
        let ds = dataset(&[
            ("question7", &[3.0, 3.0, 5.0]),
            ("question1", &[7.0, 6.0, 6.0]),
        ]);
        let stats = compute_grouped_stats(&ds, "question7", &SurveyRules::DEFAULT_RULES).unwrap();
        let q1 = find(&stats, "question1");
        assert_eq!(q1.n, 2);
        assert_eq!(q1.overall_median, 6.0);
        assert_eq!(q1.low_n, 1);
    }

    #[test]
    fn all_invalid_pivot() {
        let ds = dataset(&[
            ("question7", &[0.0, MISSING]),
            ("question1", &[5.0, 6.0]),
        ]);
        let stats = compute_grouped_stats(&ds, "question7", &SurveyRules::DEFAULT_RULES).unwrap();
        for s in stats.iter() {
            assert_eq!((s.low_n, s.high_n), (0, 0));
            assert_eq!((s.low_median, s.high_median), (0.0, 0.0));
        }
        assert_eq!(find(&stats, "question1").n, 2);
        assert_eq!(find(&stats, "question7").n, 0);
    }

    #[test]
    fn short_columns_do_not_shift_respondents() {
        let ds = dataset(&[
            ("question7", &[2.0, 2.0, 6.0, 6.0]),
            // Only the first two respondents, both in the low cohort.
            ("question3", &[1.0, 3.0]),
        ]);
        let stats = compute_grouped_stats(&ds, "question7", &SurveyRules::DEFAULT_RULES).unwrap();
        let q3 = find(&stats, "question3");
        assert_eq!((q3.n, q3.low_n, q3.high_n), (2, 2, 0));
        assert_eq!(q3.low_median, 2.0);
    }
}
