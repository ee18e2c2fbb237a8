use log::debug;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::*;
use crate::question_map::QuestionKeyMap;

/// Ranks the questions on one value, the highest value getting rank 1.
///
/// Questions for which `selector` returns `None` (or NaN) are left out and get
/// no entry in the result. Equal values share a rank; how the following rank
/// is numbered depends on the ranking mode of the rules. Tied questions are
/// listed in the order given by the tiebreak mode, so the outcome never
/// depends on the order of `stats`.
pub fn rank_by<F>(
    stats: &[GroupedStats],
    selector: F,
    rules: &SurveyRules,
    labels: Option<&QuestionKeyMap>,
) -> HashMap<String, u32>
where
    F: Fn(&GroupedStats) -> Option<f64>,
{
    let mut entries: Vec<(&str, f64)> = stats
        .iter()
        .filter_map(|s| match selector(s) {
            Some(v) if !v.is_nan() => Some((s.question_key.as_str(), v)),
            _ => None,
        })
        .collect();

    entries.sort_by(|(k1, v1), (k2, v2)| {
        v2.total_cmp(v1)
            .then_with(|| compare_for_tiebreak(k1, k2, rules.tiebreak_mode, labels))
    });

    let mut ranks: HashMap<String, u32> = HashMap::new();
    let mut current_rank: u32 = 0;
    let mut previous: Option<f64> = None;
    for (idx, (key, value)) in entries.iter().enumerate() {
        if previous != Some(*value) {
            current_rank = match rules.ranking_mode {
                RankingMode::Standard => idx as u32 + 1,
                RankingMode::Dense => current_rank + 1,
            };
        }
        debug!("rank_by: {:?} value: {} rank: {}", key, value, current_rank);
        ranks.insert(key.to_string(), current_rank);
        previous = Some(*value);
    }
    ranks
}

fn compare_for_tiebreak(
    k1: &str,
    k2: &str,
    mode: TieBreakMode,
    labels: Option<&QuestionKeyMap>,
) -> Ordering {
    match (mode, labels) {
        (TieBreakMode::QuestionText, Some(qmap)) => {
            let t1 = qmap.text_for_key(k1).unwrap_or(k1);
            let t2 = qmap.text_for_key(k2).unwrap_or(k2);
            t1.cmp(t2).then_with(|| k1.cmp(k2))
        }
        _ => k1.cmp(k2),
    }
}

/// Adds the overall, low cohort and high cohort ranks to every question.
///
/// A question missing from one of the rankings gets rank 0 for it.
pub fn rank_grouped_stats(
    stats: &[GroupedStats],
    rules: &SurveyRules,
    labels: Option<&QuestionKeyMap>,
) -> Vec<RankedStats> {
    let overall = rank_by(stats, |s| Some(s.overall_median), rules, labels);
    let low = rank_by(stats, |s| Some(s.low_median), rules, labels);
    let high = rank_by(stats, |s| Some(s.high_median), rules, labels);

    stats
        .iter()
        .map(|s| RankedStats {
            stats: s.clone(),
            rank: overall.get(&s.question_key).cloned().unwrap_or(0),
            low_rank: low.get(&s.question_key).cloned().unwrap_or(0),
            high_rank: high.get(&s.question_key).cloned().unwrap_or(0),
        })
        .collect()
}
