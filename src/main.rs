mod cli;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{AwsCommand, CheckArgs, Cli, ProviderCommand, parse_comma_list, prompt_input};
use drift_checker::engine::{SCHEMA_FIELDS, compare_all};
use drift_checker::{
    CancellationSignal, DriftError, FetchConfig, ReportMode, TerraformState, output, providers,
    render, render_summary,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        ProviderCommand::Aws { command } => match command {
            AwsCommand::Check(args) => check(args).await?,
            AwsCommand::Attributes => {
                for field in SCHEMA_FIELDS {
                    println!("{field}");
                }
            }
        },
    }

    Ok(())
}

async fn check(args: CheckArgs) -> Result<()> {
    let state_file = match &args.state_file {
        Some(path) => path.clone(),
        None => PathBuf::from(prompt_input("Enter path to Terraform state file")?),
    };
    if state_file.as_os_str().is_empty() {
        return Err(DriftError::Config("Terraform state file path not provided".to_string()).into());
    }

    let mut instance_ids = args.instance_id_list();
    if instance_ids.is_empty() {
        instance_ids = parse_comma_list(&prompt_input("Enter comma-separated EC2 instance IDs")?);
    }
    if instance_ids.is_empty() {
        return Err(DriftError::Config("no EC2 instance IDs provided".to_string()).into());
    }

    let filter = args.field_filter();
    let unknown = filter.unknown_fields();
    if !unknown.is_empty() {
        tracing::warn!(fields = ?unknown, "ignoring unrecognized attributes");
    }

    let state = TerraformState::load(&state_file).map_err(DriftError::from)?;
    tracing::debug!(
        path = %state_file.display(),
        version = ?state.version(),
        instances = state.instances().len(),
        "loaded Terraform state"
    );
    let declared = state.into_instances();

    let fetch_config = FetchConfig {
        instance_ids,
        region: args.region.clone(),
    };
    let provider = providers::get_provider("aws", &fetch_config)
        .await
        .map_err(DriftError::from)?;
    let observed = provider.fetch_all(&fetch_config).await;

    let cancel = CancellationSignal::new();
    if let Some(timeout) = args.timeout() {
        cancel.cancel_after(timeout);
    }
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling comparison");
                cancel.cancel();
            }
        });
    }

    let requested = observed.len();
    let results = compare_all(observed, declared, &filter, &cancel).await;
    if cancel.is_cancelled() && results.len() < requested {
        tracing::warn!(
            completed = results.len(),
            requested,
            "comparison cancelled before all instances were checked"
        );
    }

    let mode = args.report_mode();
    for result in &results {
        println!("{}", render(result, mode)?);

        if mode == ReportMode::Structured {
            match output::write_json_report(&args.output_dir, result) {
                Ok(path) => println!("JSON drift report written to: {}", path.display()),
                Err(err) => tracing::error!(
                    instance_id = result.instance_id(),
                    error = %err,
                    "failed to write drift report"
                ),
            }
        }
    }

    if mode == ReportMode::Narrative && !results.is_empty() {
        println!("{}", render_summary(&results));
    }

    Ok(())
}
