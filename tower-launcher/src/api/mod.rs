pub mod api_client;
pub mod forms;
pub mod models;

use async_trait::async_trait;
use common::clients::RawResponse;

use crate::Error;

use self::forms::LaunchJobTemplateForm;

/// The parts of the Tower/AWX REST API the launcher talks to.
///
/// Launch and job status responses are returned raw since the server explains
/// a refusal in the body of an error response and the caller needs to see it.
#[async_trait]
pub trait TowerApi: Send + Sync {
    /// The server the requests are sent to, for logging
    fn base_url(&self) -> &str;

    /// POST   /api/v2/job_templates/{template_id}/launch/
    async fn launch_job_template(
        &self,
        template_id: &str,
        form: &LaunchJobTemplateForm,
    ) -> Result<RawResponse, Error>;

    /// GET    {job_url}
    async fn get_job(&self, job_url: &str) -> Result<RawResponse, Error>;

    /// GET    {stdout_url}?format=txt
    async fn get_job_stdout(&self, stdout_url: &str) -> Result<String, Error>;
}
