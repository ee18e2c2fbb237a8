// Row-oriented JSON input: one record per respondent, with the course it belongs to.

use likert_stats::builder::Builder;
use likert_stats::question_map::QuestionKeyMap;
use serde::{Deserialize, Serialize};
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::collections::HashMap;

use crate::analysis::{
    io_common::{cell_text, coerce_cell, read_json_file},
    *,
};

/// The fields of a record that describe the course rather than answer a question.
pub const COURSE_FIELDS: [&str; 10] = [
    "response",
    "term",
    "instructorId",
    "firstName",
    "lastName",
    "subject",
    "number",
    "section",
    "courseId",
    "courseName",
];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub term: String,
    pub instructor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub number: String,
    pub section: String,
    pub course_id: String,
    pub course_name: String,
}

impl CourseInfo {
    fn from_record(record: &JSMap<String, JSValue>) -> CourseInfo {
        let field = |name: &str| record.get(name).map(cell_text).unwrap_or_default();
        CourseInfo {
            term: field("term"),
            instructor_id: field("instructorId"),
            first_name: field("firstName"),
            last_name: field("lastName"),
            subject: field("subject"),
            number: field("number"),
            section: field("section"),
            course_id: field("courseId"),
            course_name: field("courseName"),
        }
    }

    /// Records with the same grouping key belong to the same course.
    pub fn grouping_key(&self) -> String {
        format!(
            "{}::{}::{}::{}",
            self.term, self.instructor_id, self.course_name, self.number
        )
    }
}

pub fn read_row_records(path: &str) -> BAnalysisResult<Vec<JSMap<String, JSValue>>> {
    let js = read_json_file(path)?;
    Ok(parse_row_records(&js, path)?)
}

pub fn parse_row_records(js: &JSValue, path: &str) -> AnalysisResult<Vec<JSMap<String, JSValue>>> {
    let rows = js.as_array().context(InputShapeSnafu {
        path,
        message: "expected an array of respondent records",
    })?;
    let mut res: Vec<JSMap<String, JSValue>> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        match row {
            JSValue::Object(obj) => res.push(obj.clone()),
            _ => whatever!("{}: record {} is not an object: {:?}", path, idx + 1, row),
        }
    }
    Ok(res)
}

/// Groups the records by course, in the order in which each course first appears.
///
/// Answers are stored under the configured key of their question when the
/// field is a known question text, under the field name otherwise.
pub fn group_courses(
    records: &[JSMap<String, JSValue>],
    qmap: &QuestionKeyMap,
) -> Vec<AnalysisUnit> {
    let mut order: Vec<String> = Vec::new();
    let mut courses: HashMap<String, (CourseInfo, Builder)> = HashMap::new();

    for record in records.iter() {
        let info = CourseInfo::from_record(record);
        let key = info.grouping_key();
        let answers: Vec<(&str, Option<f64>)> = record
            .iter()
            .filter(|(field, _)| !COURSE_FIELDS.contains(&field.as_str()))
            .map(|(field, cell)| {
                let question_key = qmap.key_for_text(field).unwrap_or(field.as_str());
                let v = coerce_cell(cell);
                (question_key, if v.is_nan() { None } else { Some(v) })
            })
            .collect();
        let entry = courses.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (info, Builder::new())
        });
        entry.1.add_response(&answers);
    }

    let mut res: Vec<AnalysisUnit> = Vec::new();
    for key in order.iter() {
        if let Some((info, builder)) = courses.remove(key) {
            let dataset = builder.build();
            info!(
                "group_courses: course {:?}: {} respondents",
                key,
                dataset.num_respondents()
            );
            res.push(AnalysisUnit {
                course: Some(info),
                dataset,
            });
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(js: JSValue) -> Vec<JSMap<String, JSValue>> {
        parse_row_records(&js, "test").unwrap()
    }

    #[test]
    fn records_are_grouped_by_course() {
        let rs = records(json!([
            {"term": "Fall", "instructorId": "42", "courseName": "Statics", "number": "201", "question1": 5, "question7": 4},
            {"term": "Fall", "instructorId": "7", "courseName": "Dynamics", "number": "202", "question1": 2, "question7": 6},
            {"term": "Fall", "instructorId": "42", "courseName": "Statics", "number": "201", "section": "B", "question1": "6", "question7": 3},
        ]));
        let units = group_courses(&rs, &QuestionKeyMap::new());
        assert_eq!(units.len(), 2);
        let statics = &units[0];
        let course = statics.course.as_ref().unwrap();
        assert_eq!(course.course_name, "Statics");
        // The course description comes from the first record.
        assert_eq!(course.section, "");
        assert_eq!(statics.dataset.num_respondents(), 2);
        assert_eq!(statics.dataset.get("question1"), Some(&[5.0, 6.0][..]));
        let keys: Vec<&str> = statics.dataset.keys().collect();
        assert_eq!(keys, vec!["question1", "question7"]);
        assert_eq!(units[1].dataset.get("question7"), Some(&[6.0][..]));
    }

    #[test]
    fn question_texts_are_mapped_to_keys() {
        let mut qmap = QuestionKeyMap::new();
        qmap.insert("question7", "Students like me are REPRESENTED.");
        let rs = records(json!([
            {"term": "Fall", "Students like me are REPRESENTED.": 4, "Other question": "n/a"},
        ]));
        let units = group_courses(&rs, &qmap);
        let ds = &units[0].dataset;
        assert_eq!(ds.get("question7"), Some(&[4.0][..]));
        assert!(ds.get("Other question").unwrap()[0].is_nan());
    }

    #[test]
    fn records_must_be_objects() {
        assert!(parse_row_records(&json!([1]), "test").is_err());
        assert!(parse_row_records(&json!({}), "test").is_err());
    }
}
