use clap::Parser;
use common::tracing::init_tracing;
use tower_launcher::{
    api::api_client::TowerApiClient,
    cli::Cli,
    pipeline::GithubActionsOutputs,
    run::{report_failure, run},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let cli = Cli::parse();

    tracing::debug!("Cli args: {cli:?}");

    let poll_interval = cli.poll_interval();
    let config = cli.into_request_config();

    let mut outputs = GithubActionsOutputs::from_env();

    let result = run(
        &config,
        TowerApiClient::from_config,
        poll_interval,
        &mut outputs,
    )
    .await;

    if let Err(error) = result {
        report_failure(&error, &mut outputs);
        return Err(error.into());
    }

    Ok(())
}
