use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use drift_checker::output::DEFAULT_OUTPUT_DIR;
use drift_checker::{FieldFilter, ReportMode};

use super::parse_comma_list;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: ProviderCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    Aws {
        #[command(subcommand)]
        command: AwsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AwsCommand {
    /// Compare EC2 instances against Terraform state
    Check(CheckArgs),
    /// List the attributes that can be checked for drift
    Attributes,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Path to the Terraform .tfstate file
    #[arg(long, env = "DRIFT_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Comma-separated EC2 instance ids
    #[arg(long, env = "DRIFT_INSTANCE_IDS")]
    pub instance_ids: Option<String>,

    /// Comma-separated attributes to check for drift
    #[arg(long, env = "DRIFT_ATTRIBUTES")]
    pub attributes: Option<String>,

    /// Print reports as JSON and write them to the output directory
    #[arg(long)]
    pub json: bool,

    #[arg(long, env = "DRIFT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Abandon outstanding comparisons after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,
}

impl CheckArgs {
    pub fn instance_id_list(&self) -> Vec<String> {
        self.instance_ids
            .as_deref()
            .map(parse_comma_list)
            .unwrap_or_default()
    }

    pub fn field_filter(&self) -> FieldFilter {
        let names = self
            .attributes
            .as_deref()
            .map(parse_comma_list)
            .unwrap_or_default();

        if names.is_empty() {
            FieldFilter::defaults()
        } else {
            FieldFilter::from_names(names)
        }
    }

    pub fn report_mode(&self) -> ReportMode {
        if self.json {
            ReportMode::Structured
        } else {
            ReportMode::Narrative
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
