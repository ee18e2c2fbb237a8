use crate::analysis::*;

use likert_stats::question_map::QuestionKeyMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::collections::HashSet;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyName")]
    pub survey_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionLabel {
    pub key: String,
    pub text: Option<String>,
    pub pulse: Option<bool>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRules {
    #[serde(rename = "pivotQuestion")]
    pub pivot_question: String,
    #[serde(rename = "scaleMax")]
    pub scale_max: Option<f64>,
    #[serde(rename = "rankingMode")]
    pub ranking_mode: Option<String>,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "topDifferences")]
    pub top_differences: Option<usize>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "responseSources", default)]
    pub response_sources: Vec<ResponseSource>,
    #[serde(default)]
    pub questions: Vec<QuestionLabel>,
    pub rules: AnalysisRules,
}

impl AnalysisConfig {
    /// The question texts declared in the configuration.
    pub fn question_map(&self) -> QuestionKeyMap {
        let mut qmap = QuestionKeyMap::new();
        for q in self.questions.iter() {
            if let Some(text) = &q.text {
                qmap.insert(&q.key, text);
            }
        }
        qmap
    }

    pub fn pulse_questions(&self) -> HashSet<String> {
        self.questions
            .iter()
            .filter(|q| q.pulse.unwrap_or(false))
            .map(|q| q.key.clone())
            .collect()
    }
}

pub fn read_config(path: &str) -> BAnalysisResult<AnalysisConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: AnalysisConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_reference(path: &str) -> BAnalysisResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(js)
}
