use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::prelude::*;
use common::clap::{AsteriskRedactor, CliSecret, PlainRedactor, ASTERISK_MASK};
use serde_json::{Map, Value};

use crate::api::{forms::LaunchJobTemplateForm, TowerApi};
use crate::Error;

/// The extra var the encoded certificate is passed to the job template in
pub const CERTIFICATE_EXTRA_VAR: &str = "var_applicationGatewayFrontEndSslCertData";

/// Everything needed to launch a run, already read from the pipeline inputs.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    pub username: String,
    pub password: CliSecret<String, PlainRedactor>,
    pub base_url: String,
    pub template_id: String,
    pub certificate_path: Option<PathBuf>,
    pub scm_branch: Option<String>,
    /// A JSON object, as a string, merged into the job's extra vars
    pub additional_vars: String,
}

/// The launch payload for a single job template.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchRequest {
    pub template_id: String,
    pub form: LaunchJobTemplateForm,
    certificate_provided: bool,
}

impl LaunchRequest {
    pub fn new(
        template_id: impl Into<String>,
        scm_branch: Option<String>,
        certificate: Option<CliSecret<String, AsteriskRedactor>>,
        additional_vars: Map<String, Value>,
    ) -> Self {
        let certificate_provided = certificate.is_some();

        let mut extra_vars = Map::new();

        if let Some(certificate) = certificate.filter(|c| !c.is_empty()) {
            extra_vars.insert(
                CERTIFICATE_EXTRA_VAR.to_owned(),
                Value::String(certificate.into_inner()),
            );
        }

        // Caller supplied vars are applied last so they win over the certificate
        extra_vars.extend(additional_vars);

        Self {
            template_id: template_id.into(),
            form: LaunchJobTemplateForm::new(scm_branch.unwrap_or_default(), extra_vars),
            certificate_provided,
        }
    }

    /// Builds the request from the pipeline inputs, parsing the additional vars before
    /// anything touches the disk or the network.
    pub fn from_config(config: &RequestConfig) -> Result<Self, Error> {
        let additional_vars = parse_additional_vars(&config.additional_vars)?;

        let certificate = config
            .certificate_path
            .as_deref()
            .map(read_certificate_base64)
            .transpose()?;

        Ok(Self::new(
            config.template_id.clone(),
            config.scm_branch.clone(),
            certificate,
            additional_vars,
        ))
    }

    pub fn extra_vars(&self) -> &Map<String, Value> {
        &self.form.extra_vars
    }

    /// The extra vars with the certificate hidden, for logging
    pub fn masked_extra_vars(&self) -> Map<String, Value> {
        let mut masked = self.form.extra_vars.clone();

        if self.certificate_provided {
            masked.insert(
                CERTIFICATE_EXTRA_VAR.to_owned(),
                Value::String(ASTERISK_MASK.to_owned()),
            );
        }

        masked
    }
}

/// The API client and the launch payload for one run. Built once and never modified.
pub struct RequestContext<A> {
    pub api: A,
    pub launch: LaunchRequest,
}

impl<A> RequestContext<A>
where
    A: TowerApi,
{
    pub fn new(api: A, launch: LaunchRequest) -> Self {
        tracing::info!("Run configured to use Tower/AWX baseurl: {}", api.base_url());

        let masked = Value::Object(launch.masked_extra_vars());
        match serde_json::to_string_pretty(&masked) {
            Ok(pretty) => tracing::info!("extra-vars: {}", pretty),
            Err(e) => tracing::warn!("Failed to format extra-vars for logging: {}", e),
        }

        Self { api, launch }
    }
}

/// Parses the additional vars into the map merged over the extra vars.
///
/// Any valid JSON is accepted. Arrays and strings contribute one var per element keyed by
/// its index, `null`, booleans and numbers contribute nothing.
pub fn parse_additional_vars(additional_vars: &str) -> Result<Map<String, Value>, Error> {
    let vars = match serde_json::from_str::<Value>(additional_vars)? {
        Value::Object(vars) => vars,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(index, c)| (index.to_string(), Value::String(c.to_string())))
            .collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) => Map::new(),
    };

    Ok(vars)
}

fn read_certificate_base64(path: &Path) -> Result<CliSecret<String, AsteriskRedactor>, Error> {
    let bytes = fs::read(path).map_err(|e| Error::CertificateRead(path.to_path_buf(), e))?;
    Ok(CliSecret::new(BASE64_STANDARD.encode(bytes)))
}
