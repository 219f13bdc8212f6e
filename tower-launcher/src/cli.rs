use std::{path::PathBuf, time::Duration};

use clap::Parser;
use common::clap::{CliSecret, PlainRedactor};
use reqwest::Url;

use crate::request::RequestConfig;

/// The seconds to wait between two job status requests
const POLL_INTERVAL_SECONDS: &str = "10";

/// Launches an Ansible Tower/AWX job template and waits for the job to finish.
///
/// Every argument can also be given as a GitHub Actions input, which the runner
/// passes in `INPUT_<NAME>` environment variables.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The user to authenticate to Tower/AWX with
    #[clap(long, env = "INPUT_ANSIBLE-TOWER-USER")]
    pub ansible_tower_user: String,
    /// The password of the Tower/AWX user
    #[clap(long, env = "INPUT_ANSIBLE-TOWER-PASS")]
    pub ansible_tower_pass: CliSecret<String, PlainRedactor>,
    /// The base URL of the Tower/AWX server
    #[clap(long, env = "INPUT_ANSIBLE-TOWER-URL")]
    pub ansible_tower_url: Url,
    /// The id of the job template to launch
    #[clap(long, env = "INPUT_TEMPLATE-ID")]
    pub template_id: String,
    /// Optionally, a certificate file passed base64 encoded to the job
    #[clap(long, env = "INPUT_CERTIFICATE-PATH")]
    pub certificate_path: Option<String>,
    /// Optionally, the SCM branch the job template should run from
    #[clap(long, env = "INPUT_SCM-BRANCH")]
    pub scm_branch: Option<String>,
    /// Extra vars for the job, as JSON
    #[clap(long, env = "INPUT_ADDITIONAL-VARS", default_value = "{}")]
    pub additional_vars: String,
    /// The number of seconds to wait between two job status requests
    #[clap(long, env = "INPUT_POLL-INTERVAL-SECS", default_value = POLL_INTERVAL_SECONDS)]
    pub poll_interval_secs: u64,
}

impl Cli {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn into_request_config(self) -> RequestConfig {
        // The runner sets inputs that weren't given to the empty string
        let certificate_path = self
            .certificate_path
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        RequestConfig {
            username: self.ansible_tower_user,
            password: self.ansible_tower_pass,
            base_url: self.ansible_tower_url.to_string(),
            template_id: self.template_id,
            certificate_path,
            scm_branch: self.scm_branch,
            additional_vars: self.additional_vars,
        }
    }
}
