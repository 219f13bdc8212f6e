use serde::Serialize;
use serde_json::{Map, Value};

/// Body of `POST /api/v2/job_templates/{id}/launch/`
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LaunchJobTemplateForm {
    pub scm_branch: String,
    pub extra_vars: Map<String, Value>,
}

impl LaunchJobTemplateForm {
    pub fn new(scm_branch: impl Into<String>, extra_vars: Map<String, Value>) -> Self {
        Self {
            scm_branch: scm_branch.into(),
            extra_vars,
        }
    }
}
