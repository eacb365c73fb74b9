use clap::Parser;
use pp_recalc::{
    api::OsuApiClient,
    args::Args,
    cache::BeatmapCache,
    config::ProcessorConfig,
    error::ProcessorError,
    model::{process_profile, structures::ruleset::Ruleset, ProfileRequest}
};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ProcessorError> {
    // Validation happens before any network activity
    let request = validate(&args)?;
    let config = ProcessorConfig::from_env();

    let api = OsuApiClient::authenticate(&config, args.client_id, &args.client_secret).await?;
    let cache = BeatmapCache::new(&config);

    let report = process_profile(&api, &cache, &config, &request).await?;

    let rendered = if args.json {
        report.to_json()?
    } else {
        report.render_text()
    };

    match &args.output {
        Some(path) => write_output(path, &rendered)?,
        None => println!("{rendered}")
    }

    Ok(())
}

fn write_output(path: &std::path::Path, rendered: &str) -> Result<(), ProcessorError> {
    std::fs::write(path, rendered)
        .map_err(|e| ProcessorError::Validation(format!("cannot write report to {}: {e}", path.display())))
}

fn validate(args: &Args) -> Result<ProfileRequest, ProcessorError> {
    let profile = args.profile.trim();
    if profile.is_empty() {
        return Err(ProcessorError::Validation("profile must not be empty".to_string()));
    }

    if args.client_secret.trim().is_empty() {
        return Err(ProcessorError::Validation("client secret must not be empty".to_string()));
    }

    let ruleset = Ruleset::try_from(args.ruleset)
        .map_err(|_| ProcessorError::Validation(format!("ruleset must be 0-3, got {}", args.ruleset)))?;

    Ok(ProfileRequest {
        profile: profile.to_string(),
        ruleset
    })
}
