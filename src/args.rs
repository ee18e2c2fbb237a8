use clap::Parser;

/// This is a survey analysis program comparing two cohorts of respondents.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the analysis configuration in JSON format.
    /// For more information about the file format, read the documentation of likert_stats::manual.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the expected report in JSON format. If provided, likertgap will
    /// check that the computed report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in JSON format to the given
    /// location. Setting this option overrides the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the file containing the survey responses. Setting this option
    /// overrides the response sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default columns) The type of the input: 'columns' or 'rows'. See documentation for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (question key, default question7) The question whose answers split the respondents into cohorts.
    /// Setting this option overrides the pivot question of the --config option.
    #[clap(long, value_parser)]
    pub pivot: Option<String>,

    /// (standard or dense) How tied questions are ranked.
    #[clap(long, value_parser)]
    pub ranking_mode: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
