pub use crate::config::*;
use crate::question_map::QuestionKeyMap;

/// A builder for assembling a dataset one respondent at a time.
///
/// Answers can be given with question keys or with question texts. Texts
/// are turned into short keys by the builder's question map, which can be
/// seeded with known questions and recovered at the end.
///
/// ```
/// pub use likert_stats::builder::Builder;
///
/// let mut builder = Builder::new();
/// builder.add_response(&[("question1", Some(5.0)), ("question7", Some(4.0))]);
/// builder.add_response(&[("question7", Some(6.0))]);
/// let dataset = builder.build();
///
/// assert_eq!(dataset.num_respondents(), 2);
/// assert!(dataset.get("question1").unwrap()[1].is_nan());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _questions: QuestionKeyMap,
    pub(crate) _dataset: ResponseDataset,
    pub(crate) _respondents: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Uses the given map to resolve question texts.
    pub fn questions(self, qmap: QuestionKeyMap) -> Builder {
        Builder {
            _questions: qmap,
            _dataset: self._dataset,
            _respondents: self._respondents,
        }
    }

    /// Adds a respondent, answers given by question key.
    ///
    /// Questions not answered by this respondent are recorded as missing.
    pub fn add_response(&mut self, answers: &[(&str, Option<f64>)]) {
        let idx = self._respondents;
        self._respondents += 1;
        for (key, value) in answers {
            let mut column: Vec<f64> = self._dataset.get(key).map(|v| v.to_vec()).unwrap_or_default();
            column.resize(idx, MISSING);
            column.push(value.unwrap_or(MISSING));
            self._dataset.insert(key, column);
        }
        self.pad_columns();
    }

    /// Adds a respondent, answers given by question text.
    pub fn add_labelled_response(&mut self, answers: &[(&str, Option<f64>)]) {
        let keyed: Vec<(String, Option<f64>)> = answers
            .iter()
            .map(|(text, value)| (self._questions.get_or_create_key(text), *value))
            .collect();
        let refs: Vec<(&str, Option<f64>)> =
            keyed.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        self.add_response(&refs);
    }

    fn pad_columns(&mut self) {
        let n = self._respondents;
        let short: Vec<String> = self
            ._dataset
            .iter()
            .filter(|(_, v)| v.len() < n)
            .map(|(k, _)| k.to_string())
            .collect();
        for key in short {
            let mut column = self._dataset.get(&key).map(|v| v.to_vec()).unwrap_or_default();
            column.resize(n, MISSING);
            self._dataset.insert(&key, column);
        }
    }

    pub fn question_map(&self) -> &QuestionKeyMap {
        &self._questions
    }

    pub fn build(self) -> ResponseDataset {
        self._dataset
    }

    pub fn into_parts(self) -> (ResponseDataset, QuestionKeyMap) {
        (self._dataset, self._questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_questions_are_backfilled() {
        let mut b = Builder::new();
        b.add_response(&[("q1", Some(3.0))]);
        b.add_response(&[("q1", Some(4.0)), ("q2", Some(5.0))]);
        let ds = b.build();
        let keys: Vec<&str> = ds.keys().collect();
        assert_eq!(keys, vec!["q1", "q2"]);
        let q2 = ds.get("q2").unwrap();
        assert_eq!(q2.len(), 2);
        assert!(q2[0].is_nan());
        assert_eq!(q2[1], 5.0);
    }

    #[test]
    fn skipped_answers_are_missing() {
        let mut b = Builder::new();
        b.add_response(&[("q1", Some(3.0)), ("q2", None)]);
        b.add_response(&[("q2", Some(1.0))]);
        let ds = b.build();
        assert!(ds.get("q1").unwrap()[1].is_nan());
        assert!(ds.get("q2").unwrap()[0].is_nan());
    }

    #[test]
    fn texts_are_resolved_with_the_question_map() {
        let mut qmap = QuestionKeyMap::new();
        qmap.insert("question7", "Students like me are REPRESENTED.");
        let mut b = Builder::new().questions(qmap);
        b.add_labelled_response(&[
            ("Students like me are REPRESENTED.", Some(4.0)),
            ("The course was well organized.", Some(6.0)),
        ]);
        let (ds, qmap) = b.into_parts();
        assert_eq!(ds.get("question7"), Some(&[4.0][..]));
        assert_eq!(ds.get("1"), Some(&[6.0][..]));
        assert_eq!(qmap.text_for_key("1"), Some("The course was well organized."));
    }
}
