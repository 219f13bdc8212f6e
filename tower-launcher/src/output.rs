use crate::api::models::{JobState, JobStatusSnapshot};
use crate::api::TowerApi;
use crate::Error;

const OUTPUT_BANNER: &str =
    "******************************Ansible Tower output******************************";
const ERROR_OUTPUT_BANNER: &str =
    "***************************Ansible Tower error output***************************";
const TRACEBACK_BANNER: &str =
    "***************************Ansible Tower traceback output***************************";

/// What the final job status and its output mean for the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputClassification {
    Succeeded,
    Failed,
    Errored,
    /// The output couldn't be matched to a final status, the run carries on with a warning
    Unclassified,
}

impl OutputClassification {
    pub fn classify(state: JobState, has_output: bool) -> Self {
        match (state, has_output) {
            (JobState::Failed, true) => OutputClassification::Failed,
            (JobState::Error, _) => OutputClassification::Errored,
            (JobState::Successful, true) => OutputClassification::Succeeded,
            _ => OutputClassification::Unclassified,
        }
    }
}

/// Downloads the plain text output of a finished job, prints it and turns a failed
/// or errored job into an error.
///
/// The output is returned for successful and unclassified jobs so it can be searched
/// for a resource name.
pub async fn print_job_output<A>(api: &A, snapshot: &JobStatusSnapshot) -> Result<String, Error>
where
    A: TowerApi + ?Sized,
{
    let output = match &snapshot.stdout_url {
        Some(stdout_url) => api.get_job_stdout(stdout_url).await?,
        None => {
            tracing::warn!("{} has no output link", snapshot);
            String::new()
        }
    };

    tracing::info!("Final status: {}", snapshot.status);

    match OutputClassification::classify(snapshot.state(), !output.is_empty()) {
        OutputClassification::Failed => {
            tracing::error!("{}", ERROR_OUTPUT_BANNER);
            tracing::error!("{}", output);
            Err(Error::JobFailed(snapshot.id))
        }
        OutputClassification::Errored => {
            tracing::error!("{}", ERROR_OUTPUT_BANNER);
            tracing::error!("{}", output);
            tracing::error!("{}", TRACEBACK_BANNER);
            tracing::error!("{}", snapshot.result_traceback.as_deref().unwrap_or_default());
            Err(Error::JobErrored(snapshot.id))
        }
        OutputClassification::Succeeded => {
            tracing::info!("{}", OUTPUT_BANNER);
            tracing::info!("{}", output);
            Ok(output)
        }
        OutputClassification::Unclassified => {
            tracing::warn!("An error occurred trying to get the ansible tower output");
            tracing::info!("{}", output);
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OutputClassification;
    use crate::api::models::JobState;

    #[test]
    fn classification_table() {
        use OutputClassification::*;

        assert_eq!(OutputClassification::classify(JobState::Failed, true), Failed);
        assert_eq!(OutputClassification::classify(JobState::Error, true), Errored);
        assert_eq!(OutputClassification::classify(JobState::Error, false), Errored);
        assert_eq!(OutputClassification::classify(JobState::Successful, true), Succeeded);
    }

    #[test]
    fn missing_output_is_unclassified() {
        assert_eq!(
            OutputClassification::classify(JobState::Failed, false),
            OutputClassification::Unclassified
        );
        assert_eq!(
            OutputClassification::classify(JobState::Successful, false),
            OutputClassification::Unclassified
        );
        assert_eq!(
            OutputClassification::classify(JobState::NonTerminal, true),
            OutputClassification::Unclassified
        );
    }
}
