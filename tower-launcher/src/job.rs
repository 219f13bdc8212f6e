use std::time::Duration;

use common::clients::RawResponse;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::api::models::{detail_to_string, JobStatusResponse, JobStatusSnapshot, LaunchResponse};
use crate::api::TowerApi;
use crate::request::LaunchRequest;
use crate::Error;

/// Decodes a response body leniently, a body that isn't the expected JSON decodes
/// to the all-empty value so it is reported as an unexpected response by the caller.
fn decode_lenient<T>(raw: &RawResponse) -> T
where
    T: DeserializeOwned + Default,
{
    raw.json()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// Launches the job template and returns the URL of the created job.
pub async fn launch_job<A>(api: &A, launch: &LaunchRequest) -> Result<String, Error>
where
    A: TowerApi + ?Sized,
{
    let template_id = &launch.template_id;

    tracing::info!("Launching Template ID: {}", template_id);

    let raw = api.launch_job_template(template_id, &launch.form).await?;

    match decode_lenient::<LaunchResponse>(&raw) {
        LaunchResponse {
            job: Some(job),
            url: Some(url),
            status,
            ..
        } => {
            tracing::info!("Template Id {} launched successfully.", template_id);
            tracing::info!(
                "Job {} was created on Ansible Tower: Status {}.",
                job,
                status.as_deref().unwrap_or("unknown")
            );
            Ok(url)
        }
        LaunchResponse {
            job: None,
            detail: Some(detail),
            ..
        } => {
            tracing::error!("{} {}", raw.status, raw.body);
            tracing::error!(
                "Template ID {} couldn't be launched, the Ansible API is returning the following error:",
                template_id
            );
            Err(Error::LaunchRejected {
                template_id: template_id.clone(),
                detail: detail_to_string(&detail),
            })
        }
        _ => {
            tracing::error!("{} {}", raw.status, raw.body);
            Err(Error::LaunchUnavailable(template_id.clone()))
        }
    }
}

async fn fetch_job_status<A>(api: &A, job_url: &str) -> Result<JobStatusSnapshot, Error>
where
    A: TowerApi + ?Sized,
{
    let raw = api.get_job(job_url).await?;

    let response = decode_lenient::<JobStatusResponse>(&raw);

    match response {
        JobStatusResponse {
            status: Some(status),
            id,
            url,
            related,
            result_traceback,
            ..
        } if !status.is_empty() => Ok(JobStatusSnapshot {
            status,
            id: id.unwrap_or_default(),
            url,
            stdout_url: related.and_then(|related| related.stdout),
            result_traceback,
        }),
        JobStatusResponse {
            detail: Some(detail),
            ..
        } => {
            tracing::error!("Failed to get job status from Ansible Tower.");
            tracing::error!("{} {}", raw.status, raw.body);
            Err(Error::StatusFetchRejected(detail_to_string(&detail)))
        }
        _ => {
            tracing::error!("{} {}", raw.status, raw.body);
            Err(Error::StatusFetchUnavailable)
        }
    }
}

/// Polls the job until it is `successful`, `failed` or `error` and returns the final status.
///
/// There is no limit on the number of polls, a job runs for as long as the server lets it.
pub async fn wait_for_final_status<A>(
    api: &A,
    job_url: &str,
    poll_interval: Duration,
) -> Result<JobStatusSnapshot, Error>
where
    A: TowerApi + ?Sized,
{
    loop {
        let snapshot = fetch_job_status(api, job_url).await?;

        if snapshot.state().is_terminal() {
            return Ok(snapshot);
        }

        tracing::info!("Validating Job status...");
        sleep(poll_interval).await;
        tracing::info!("Job status: {}.", snapshot.status);
    }
}
