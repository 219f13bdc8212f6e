use async_trait::async_trait;
use common::clients::{
    capture_response, handle_response_text, AuthenticatedSession, BasicAuthCredentials,
    RawResponse,
};

use crate::{request::RequestConfig, Error};

use super::{forms::LaunchJobTemplateForm, TowerApi};

/// Tower servers are internal and commonly run with self signed certificates
const ACCEPT_INVALID_CERTS: bool = true;

#[derive(Clone, Debug)]
pub struct TowerApiClient {
    session: AuthenticatedSession,
}

impl TowerApiClient {
    pub fn new(base_url: &str, credentials: BasicAuthCredentials) -> Result<Self, Error> {
        let session = AuthenticatedSession::new(base_url, credentials, ACCEPT_INVALID_CERTS)?;
        Ok(Self { session })
    }

    pub fn from_config(config: &RequestConfig) -> Result<Self, Error> {
        let credentials = BasicAuthCredentials::new(&config.username, config.password.clone());
        Self::new(&config.base_url, credentials)
    }
}

#[async_trait]
impl TowerApi for TowerApiClient {
    fn base_url(&self) -> &str {
        self.session.base_url()
    }

    async fn launch_job_template(
        &self,
        template_id: &str,
        form: &LaunchJobTemplateForm,
    ) -> Result<RawResponse, Error> {
        let path = format!("api/v2/job_templates/{template_id}/launch/");

        let resp = self.session.post(&path)?.json(form).send().await?;

        Ok(capture_response(resp).await?)
    }

    async fn get_job(&self, job_url: &str) -> Result<RawResponse, Error> {
        let resp = self.session.get(job_url)?.send().await?;

        Ok(capture_response(resp).await?)
    }

    async fn get_job_stdout(&self, stdout_url: &str) -> Result<String, Error> {
        let resp = self
            .session
            .get(stdout_url)?
            .query(&[("format", "txt")])
            .send()
            .await?;

        Ok(handle_response_text(resp).await?)
    }
}
