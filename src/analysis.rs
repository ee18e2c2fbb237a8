use log::{debug, info, warn};

use likert_stats::question_map::QuestionKeyMap;
use likert_stats::*;
use snafu::{prelude::*, Snafu};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
mod io_columns;
mod io_common;
mod io_rows;

use crate::analysis::config_reader::*;
use crate::analysis::io_rows::CourseInfo;

#[derive(Debug, Snafu)]
pub enum AnalysisError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the report to {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unexpected content in {path}: {message}"))]
    InputShape { path: String, message: String },
    #[snafu(display("Unknown input type {input_type:?}"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown ranking mode {mode:?}, expected standard or dense"))]
    UnknownRankingMode { mode: String },
    #[snafu(display("Unknown tiebreak mode {mode:?}, expected questionKey or questionText"))]
    UnknownTiebreakMode { mode: String },
    #[snafu(display("The scale maximum must be a positive number, got {scale_max}"))]
    InvalidScale { scale_max: f64 },
    #[snafu(display("No response source: use --input or responseSources in the configuration"))]
    MissingInput {},
    #[snafu(display("Missing parent directory"))]
    MissingParentDir {},
    #[snafu(display("Analysis failed"))]
    Survey { source: SurveyError },
    #[snafu(display("Difference detected between computed report and reference report"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
pub type BAnalysisResult<T> = Result<T, Box<AnalysisError>>;

/// One dataset to analyse: all the responses, or the responses of one course.
#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisUnit {
    pub course: Option<CourseInfo>,
    pub dataset: ResponseDataset,
}

const DEFAULT_PIVOT_QUESTION: &str = "question7";

fn ranking_mode_name(mode: RankingMode) -> &'static str {
    match mode {
        RankingMode::Standard => "standard",
        RankingMode::Dense => "dense",
    }
}

fn tiebreak_mode_name(mode: TieBreakMode) -> &'static str {
    match mode {
        TieBreakMode::QuestionKey => "questionKey",
        TieBreakMode::QuestionText => "questionText",
    }
}

fn validate_rules(rules: &AnalysisRules) -> AnalysisResult<SurveyRules> {
    let defaults = SurveyRules::DEFAULT_RULES;
    let res = SurveyRules {
        scale_max: match rules.scale_max {
            None => defaults.scale_max,
            Some(x) if x.is_finite() && x > 0.0 => x,
            Some(x) => return InvalidScaleSnafu { scale_max: x }.fail(),
        },
        ranking_mode: match rules.ranking_mode.as_deref() {
            None | Some("standard") => RankingMode::Standard,
            Some("dense") => RankingMode::Dense,
            Some(x) => return UnknownRankingModeSnafu { mode: x }.fail(),
        },
        tiebreak_mode: match rules.tiebreak_mode.as_deref() {
            None | Some("questionKey") => TieBreakMode::QuestionKey,
            Some("questionText") => TieBreakMode::QuestionText,
            Some(x) => return UnknownTiebreakModeSnafu { mode: x }.fail(),
        },
        top_differences: rules.top_differences.unwrap_or(defaults.top_differences),
    };
    Ok(res)
}

fn ranked_stats_to_json(
    ranked: &[RankedStats],
    qmap: &QuestionKeyMap,
    pulse_questions: &HashSet<String>,
) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for r in ranked.iter() {
        let s = &r.stats;
        let mut obj: JSMap<String, JSValue> = JSMap::new();
        obj.insert("questionKey".to_string(), json!(s.question_key));
        if let Some(text) = qmap.text_for_key(&s.question_key) {
            obj.insert("questionText".to_string(), json!(text));
        }
        obj.insert(
            "pulse".to_string(),
            json!(pulse_questions.contains(&s.question_key)),
        );
        obj.insert("overallMedian".to_string(), json!(s.overall_median));
        obj.insert("lowMedian".to_string(), json!(s.low_median));
        obj.insert("highMedian".to_string(), json!(s.high_median));
        obj.insert("n".to_string(), json!(s.n));
        obj.insert("lowN".to_string(), json!(s.low_n));
        obj.insert("highN".to_string(), json!(s.high_n));
        obj.insert("rank".to_string(), json!(r.rank));
        obj.insert("lowRank".to_string(), json!(r.low_rank));
        obj.insert("highRank".to_string(), json!(r.high_rank));
        l.push(JSValue::Object(obj));
    }
    l
}

fn summary_to_json(summary: &Summary) -> JSValue {
    let median_diffs: Vec<JSValue> = summary
        .top_median_differences
        .iter()
        .map(|d| {
            json!({
                "questionKey": d.question_key,
                "difference": d.difference,
                "lowMedian": d.low_median,
                "highMedian": d.high_median,
            })
        })
        .collect();
    let rank_diffs: Vec<JSValue> = summary
        .top_rank_differences
        .iter()
        .map(|d| {
            json!({
                "questionKey": d.question_key,
                "rankDifference": d.rank_difference,
                "lowRank": d.low_rank,
                "highRank": d.high_rank,
            })
        })
        .collect();
    json!({
        "lowLessFavorablePct": summary.low_less_favorable_pct,
        "highLessFavorablePct": summary.high_less_favorable_pct,
        "sameResponsePct": summary.same_response_pct,
        "topMedianDifferences": median_diffs,
        "topRankDifferences": rank_diffs,
        "averageLowMedian": summary.average_low_median,
        "averageHighMedian": summary.average_high_median,
    })
}

fn unit_result_to_json(
    unit: &AnalysisUnit,
    res: &SurveyResult,
    qmap: &QuestionKeyMap,
    pulse_questions: &HashSet<String>,
) -> JSValue {
    let mut obj: JSMap<String, JSValue> = JSMap::new();
    if let Some(course) = &unit.course {
        obj.insert("course".to_string(), json!(course));
    }
    obj.insert("pivotMedian".to_string(), json!(res.pivot_median));
    obj.insert("respondents".to_string(), json!(res.respondents));
    obj.insert("lowCount".to_string(), json!(res.low_count));
    obj.insert("highCount".to_string(), json!(res.high_count));
    obj.insert(
        "questions".to_string(),
        JSValue::Array(ranked_stats_to_json(&res.ranked, qmap, pulse_questions)),
    );
    obj.insert("summary".to_string(), summary_to_json(&res.summary));
    JSValue::Object(obj)
}

fn build_report_js(config: &AnalysisConfig, rules: &SurveyRules, results: Vec<JSValue>) -> JSValue {
    json!({
        "config": {
            "survey": config.output_settings.survey_name,
            "pivotQuestion": config.rules.pivot_question,
            "rankingMode": ranking_mode_name(rules.ranking_mode),
            "tiebreakMode": tiebreak_mode_name(rules.tiebreak_mode),
        },
        "results": results,
    })
}

/// The configuration used when no configuration file is given.
fn config_from_args(args: &Args) -> AnalysisConfig {
    let survey_name = args
        .input
        .as_deref()
        .map(io_common::simplify_file_name)
        .unwrap_or_else(|| "survey".to_string());
    AnalysisConfig {
        output_settings: OutputSettings {
            survey_name,
            output_directory: None,
        },
        response_sources: Vec::new(),
        questions: Vec::new(),
        rules: AnalysisRules {
            pivot_question: DEFAULT_PIVOT_QUESTION.to_string(),
            scale_max: None,
            ranking_mode: None,
            tiebreak_mode: None,
            top_differences: None,
        },
    }
}

/// Reads all the sources. Column sources are stacked into a single dataset,
/// row sources are pooled and then split by course.
fn read_units(
    root: &Path,
    sources: &[ResponseSource],
    qmap: &QuestionKeyMap,
) -> BAnalysisResult<Vec<AnalysisUnit>> {
    let mut columns: Option<ResponseDataset> = None;
    let mut records: Vec<JSMap<String, JSValue>> = Vec::new();
    for source in sources.iter() {
        let p: PathBuf = root.join(&source.file_path);
        let path = p.as_path().display().to_string();
        match source.provider.as_str() {
            "columns" => {
                let ds = io_columns::read_columns(&path)?;
                match columns.as_mut() {
                    Some(acc) => acc.append_respondents(&ds),
                    None => columns = Some(ds),
                }
            }
            "rows" => {
                let mut rs = io_rows::read_row_records(&path)?;
                records.append(&mut rs);
            }
            x => {
                return Err(Box::new(AnalysisError::UnknownInputType {
                    input_type: x.to_string(),
                }));
            }
        }
    }

    let mut units: Vec<AnalysisUnit> = Vec::new();
    if let Some(dataset) = columns {
        units.push(AnalysisUnit {
            course: None,
            dataset,
        });
    }
    if !records.is_empty() {
        units.extend(io_rows::group_courses(&records, qmap));
    }
    Ok(units)
}

fn write_report(pretty: &str, args: &Args, config: &AnalysisConfig, root: &Path) -> BAnalysisResult<()> {
    let destination: Option<PathBuf> = match (args.out.as_deref(), &config.output_settings.output_directory) {
        (Some("stdout"), _) => None,
        (Some(p), _) => Some(PathBuf::from(p)),
        (None, Some(dir)) => Some(root.join(dir).join(format!(
            "{}_summary.json",
            config.output_settings.survey_name.replace(' ', "_")
        ))),
        (None, None) => None,
    };
    match destination {
        Some(p) => {
            let path = p.display().to_string();
            info!("Writing report to {:?}", path);
            fs::write(&p, pretty).context(WritingReportSnafu { path })?;
        }
        None => {
            println!("{}", pretty);
        }
    }
    Ok(())
}

pub fn run_analysis(args: &Args) -> BAnalysisResult<()> {
    let (mut config, root): (AnalysisConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        None => (config_from_args(args), PathBuf::new()),
    };

    if let Some(pivot) = &args.pivot {
        config.rules.pivot_question = pivot.clone();
    }
    if let Some(mode) = &args.ranking_mode {
        config.rules.ranking_mode = Some(mode.clone());
    }
    info!("config: {:?}", config);

    // Validate the rules:
    let rules = validate_rules(&config.rules)?;

    let (sources, source_root): (Vec<ResponseSource>, PathBuf) = match &args.input {
        Some(input) => (
            vec![ResponseSource {
                provider: args
                    .input_type
                    .clone()
                    .unwrap_or_else(|| "columns".to_string()),
                file_path: input.clone(),
            }],
            PathBuf::new(),
        ),
        None => (config.response_sources.clone(), root.clone()),
    };
    if sources.is_empty() {
        return Err(Box::new(AnalysisError::MissingInput {}));
    }

    let qmap = config.question_map();
    let pulse_questions = config.pulse_questions();
    let units = read_units(&source_root, &sources, &qmap)?;
    info!("Analysing {} datasets", units.len());

    let mut results: Vec<JSValue> = Vec::new();
    for unit in units.iter() {
        debug!("run_analysis: course: {:?}", unit.course);
        let res = run_survey_stats(
            &unit.dataset,
            &config.rules.pivot_question,
            &rules,
            Some(&qmap),
        )
        .context(SurveySnafu {})?;
        results.push(unit_result_to_json(unit, &res, &qmap, &pulse_questions));
    }

    let report = build_report_js(&config, &rules, results);
    let pretty_report = serde_json::to_string_pretty(&report).context(ParsingJsonSnafu {})?;
    write_report(&pretty_report, args, &config, &root)?;

    // The reference report, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let reference = read_reference(reference_path)?;
        if reference != report {
            let pretty_reference =
                serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
            warn!("Found differences with the reference report");
            print_diff(pretty_reference.as_str(), pretty_report.as_str(), "\n");
            return Err(Box::new(AnalysisError::ReferenceMismatch {}));
        }
        info!("The report matches the reference {:?}", reference_path);
    }

    Ok(())
}

#[cfg(test)]
fn run_analysis_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> BAnalysisResult<()> {
    let test_dir = option_env!("LIKERTGAP_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"));
    info!("Running test {}", test_name);
    let args = Args {
        config: Some(format!("{}/{}/{}", test_dir, test_name, config_lpath)),
        reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        out: Some("stdout".to_string()),
        ..Args::default()
    };
    let res = run_analysis(&args);
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
    }
    res
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) -> BAnalysisResult<()> {
    run_analysis_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    )
}
