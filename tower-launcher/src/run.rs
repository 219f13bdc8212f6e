use std::time::Duration;

use crate::api::TowerApi;
use crate::job::{launch_job, wait_for_final_status};
use crate::output::print_job_output;
use crate::pipeline::PipelineOutputs;
use crate::request::{LaunchRequest, RequestConfig, RequestContext};
use crate::resource_name::export_resource_name;
use crate::Error;

/// Launches the job, waits for it, prints its output and publishes the resource name
/// found in it. Returns the resource name, if there was one.
pub async fn run_job<A>(
    context: &RequestContext<A>,
    poll_interval: Duration,
    outputs: &mut dyn PipelineOutputs,
) -> Result<Option<String>, Error>
where
    A: TowerApi,
{
    let job_url = launch_job(&context.api, &context.launch).await?;

    let snapshot = wait_for_final_status(&context.api, &job_url, poll_interval).await?;

    let output = print_job_output(&context.api, &snapshot).await?;

    export_resource_name(&output, outputs)
}

/// Runs the whole flow from the pipeline inputs.
///
/// The inputs are validated before `connect` is called, so a malformed input never
/// results in a request to the server.
pub async fn run<A, F>(
    config: &RequestConfig,
    connect: F,
    poll_interval: Duration,
    outputs: &mut dyn PipelineOutputs,
) -> Result<Option<String>, Error>
where
    A: TowerApi,
    F: FnOnce(&RequestConfig) -> Result<A, Error>,
{
    let launch = LaunchRequest::from_config(config)?;

    let api = connect(config)?;

    let context = RequestContext::new(api, launch);

    run_job(&context, poll_interval, outputs).await
}

/// Logs the failure and signals it to the pipeline
pub fn report_failure(error: &Error, outputs: &mut dyn PipelineOutputs) {
    tracing::error!("{}", error);
    outputs.set_failed(error.pipeline_message());
}
