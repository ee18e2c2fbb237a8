use log::info;

use crate::config::*;

/// Compares the two cohorts over all the questions.
///
/// Every question is counted in exactly one of the three percentages (low
/// cohort less favorable, high cohort less favorable, same median). The top
/// differences lists hold the questions with the largest gap between the
/// cohort medians and between the cohort ranks, largest first, with at most
/// `rules.top_differences` entries each. An empty input gives zeros and empty
/// lists.
pub fn summarize(ranked: &[RankedStats], rules: &SurveyRules) -> Summary {
    let total = ranked.len();

    let mut low_less: usize = 0;
    let mut high_less: usize = 0;
    let mut same: usize = 0;
    let mut low_sum: f64 = 0.0;
    let mut high_sum: f64 = 0.0;
    let mut median_differences: Vec<MedianDifference> = Vec::new();
    let mut rank_differences: Vec<RankDifference> = Vec::new();

    for r in ranked.iter() {
        let low = r.stats.low_median;
        let high = r.stats.high_median;
        if low < high {
            low_less += 1;
        } else if high < low {
            high_less += 1;
        } else {
            same += 1;
        }
        low_sum += low;
        high_sum += high;

        median_differences.push(MedianDifference {
            question_key: r.stats.question_key.clone(),
            difference: (high - low).abs(),
            low_median: low,
            high_median: high,
        });
        rank_differences.push(RankDifference {
            question_key: r.stats.question_key.clone(),
            rank_difference: r.high_rank.abs_diff(r.low_rank),
            low_rank: r.low_rank,
            high_rank: r.high_rank,
        });
    }

    // Stable sorts: equal differences stay in question order.
    median_differences.sort_by(|a, b| b.difference.total_cmp(&a.difference));
    rank_differences.sort_by(|a, b| b.rank_difference.cmp(&a.rank_difference));
    median_differences.truncate(rules.top_differences);
    rank_differences.truncate(rules.top_differences);

    let pct = |count: usize| -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    };
    let average = |sum: f64| -> f64 {
        if total == 0 {
            0.0
        } else {
            sum / total as f64
        }
    };

    let summary = Summary {
        low_less_favorable_pct: pct(low_less),
        high_less_favorable_pct: pct(high_less),
        same_response_pct: pct(same),
        top_median_differences: median_differences,
        top_rank_differences: rank_differences,
        average_low_median: average(low_sum),
        average_high_median: average(high_sum),
    };
    info!(
        "summarize: {} questions: low less favorable: {} high less favorable: {} same: {}",
        total, low_less, high_less, same
    );
    summary
}
