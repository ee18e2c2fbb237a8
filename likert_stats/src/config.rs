// ********* Input data structures ***********

use snafu::Snafu;

/// The value stored for a respondent who did not answer a question.
///
/// Any non-finite value is treated as missing by the validity rules, so
/// this only needs to be distinct from a real answer.
pub const MISSING: f64 = f64::NAN;

/// Column-oriented survey responses.
///
/// Every column is one question, every position is one respondent: index `i`
/// refers to the same person in all the columns. Columns keep the order in
/// which they were inserted.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ResponseDataset {
    columns: Vec<(String, Vec<f64>)>,
}

impl ResponseDataset {
    pub fn new() -> ResponseDataset {
        ResponseDataset {
            columns: Vec::new(),
        }
    }

    /// Inserts the responses for a question.
    ///
    /// If the question is already present, its responses are replaced and it
    /// keeps its original position.
    pub fn insert(&mut self, question_key: &str, values: Vec<f64>) {
        if let Some(col) = self.columns.iter_mut().find(|(k, _)| k == question_key) {
            col.1 = values;
        } else {
            self.columns.push((question_key.to_string(), values));
        }
    }

    pub fn get(&self, question_key: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(k, _)| k == question_key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, question_key: &str) -> bool {
        self.get(question_key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The number of questions.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The number of respondents, as given by the longest column.
    pub fn num_respondents(&self) -> usize {
        self.columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0)
    }

    /// Adds the respondents of another dataset after the respondents of this one.
    ///
    /// Questions that only exist on one side are padded with missing values so
    /// that every respondent keeps the same index in all the columns.
    pub fn append_respondents(&mut self, other: &ResponseDataset) {
        let offset = self.num_respondents();
        let added = other.num_respondents();
        for (_, values) in self.columns.iter_mut() {
            values.resize(offset, MISSING);
        }
        for (key, values) in other.iter() {
            let mut padded = values.to_vec();
            padded.resize(added, MISSING);
            match self.columns.iter_mut().find(|(k, _)| k == key) {
                Some(col) => col.1.extend(padded),
                None => {
                    let mut col = vec![MISSING; offset];
                    col.extend(padded);
                    self.columns.push((key.to_string(), col));
                }
            }
        }
        for (_, values) in self.columns.iter_mut() {
            values.resize(offset + added, MISSING);
        }
    }
}

// ******** Output data structures *********

/// One of the two comparison groups derived from the pivot question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Cohort {
    /// At or below the pivot median.
    Low,
    /// Strictly above the pivot median.
    High,
}

/// Statistics for one question
#[derive(PartialEq, Debug, Clone)]
pub struct GroupedStats {
    pub question_key: String,
    pub overall_median: f64,
    pub low_median: f64,
    pub high_median: f64,
    pub n: usize,
    pub low_n: usize,
    pub high_n: usize,
}

/// Statistics for one question, with its position in each of the three rankings.
///
/// A rank of 0 means that the question did not take part in that ranking.
#[derive(PartialEq, Debug, Clone)]
pub struct RankedStats {
    pub stats: GroupedStats,
    pub rank: u32,
    pub low_rank: u32,
    pub high_rank: u32,
}

#[derive(PartialEq, Debug, Clone)]
pub struct MedianDifference {
    pub question_key: String,
    pub difference: f64,
    pub low_median: f64,
    pub high_median: f64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankDifference {
    pub question_key: String,
    pub rank_difference: u32,
    pub low_rank: u32,
    pub high_rank: u32,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Summary {
    pub low_less_favorable_pct: f64,
    pub high_less_favorable_pct: f64,
    pub same_response_pct: f64,
    pub top_median_differences: Vec<MedianDifference>,
    pub top_rank_differences: Vec<RankDifference>,
    pub average_low_median: f64,
    pub average_high_median: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct SurveyResult {
    pub pivot_median: f64,
    pub respondents: usize,
    pub low_count: usize,
    pub high_count: usize,
    pub ranked: Vec<RankedStats>,
    pub summary: Summary,
}

/// Errors that prevent the statistics from being computed.
///
/// Data quality problems (empty groups, invalid answers) are never errors:
/// they resolve to the sentinel values documented on each operation.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("The pivot question {key:?} is not part of the dataset"))]
    MissingPivotQuestion { key: String },
}

// ********* Configuration **********

/// How equal values are numbered.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RankingMode {
    /// Ties share a rank and the next rank skips accordingly (1, 1, 3).
    Standard,
    /// Ties share a rank and the next rank follows immediately (1, 1, 2).
    Dense,
}

/// The order given to questions that have the same value in a ranking.
///
/// The resulting ranks are the same either way, only the listing order of
/// the tied questions changes.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Ascending question key.
    QuestionKey,
    /// Ascending question text, when a label is known, then ascending key.
    QuestionText,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct SurveyRules {
    /// The highest valid answer on the scale. The lowest is anything above 0.
    pub scale_max: f64,
    pub ranking_mode: RankingMode,
    pub tiebreak_mode: TieBreakMode,
    /// How many questions are reported in each list of largest differences.
    pub top_differences: usize,
}

impl SurveyRules {
    pub const DEFAULT_RULES: SurveyRules = SurveyRules {
        scale_max: 6.0,
        ranking_mode: RankingMode::Standard,
        tiebreak_mode: TieBreakMode::QuestionKey,
        top_differences: 2,
    };

    pub fn is_valid_response(&self, value: f64) -> bool {
        value.is_finite() && value > 0.0 && value <= self.scale_max
    }

    /// The value at this position if it is a valid answer.
    ///
    /// Positions past the end of a short column are treated as missing.
    pub fn valid_at(&self, values: &[f64], idx: usize) -> Option<f64> {
        values
            .get(idx)
            .cloned()
            .filter(|v| self.is_valid_response(*v))
    }
}

impl Default for SurveyRules {
    fn default() -> Self {
        SurveyRules::DEFAULT_RULES
    }
}
