// Column-oriented JSON input: one array of answers per question.

use likert_stats::ResponseDataset;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::analysis::{
    io_common::{coerce_cell, read_json_file},
    *,
};

pub fn read_columns(path: &str) -> BAnalysisResult<ResponseDataset> {
    let js = read_json_file(path)?;
    Ok(parse_columns(&js, path)?)
}

pub fn parse_columns(js: &JSValue, path: &str) -> AnalysisResult<ResponseDataset> {
    let obj = js.as_object().context(InputShapeSnafu {
        path,
        message: "expected an object of question columns",
    })?;
    let mut dataset = ResponseDataset::new();
    for (question_key, column) in obj.iter() {
        let cells = column.as_array().context(InputShapeSnafu {
            path,
            message: format!("question {:?} is not an array of answers", question_key),
        })?;
        let values: Vec<f64> = cells.iter().map(coerce_cell).collect();
        debug!(
            "parse_columns: {:?}: {} responses",
            question_key,
            values.len()
        );
        dataset.insert(question_key, values);
    }
    let n = dataset.num_respondents();
    for (question_key, values) in dataset.iter() {
        if values.len() != n {
            warn!(
                "parse_columns: {}: question {:?} has {} responses, expected {}",
                path,
                question_key,
                values.len(),
                n
            );
        }
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_keep_file_order() {
        let js = json!({
            "question9": [1, 2],
            "question1": ["3", null],
        });
        let ds = parse_columns(&js, "test").unwrap();
        let keys: Vec<&str> = ds.keys().collect();
        assert_eq!(keys, vec!["question9", "question1"]);
        let q1 = ds.get("question1").unwrap();
        assert_eq!(q1[0], 3.0);
        assert!(q1[1].is_nan());
    }

    #[test]
    fn wrong_shapes() {
        assert!(matches!(
            parse_columns(&json!([1, 2]), "test"),
            Err(AnalysisError::InputShape { .. })
        ));
        assert!(matches!(
            parse_columns(&json!({"question1": 4}), "test"),
            Err(AnalysisError::InputShape { .. })
        ));
    }
}
