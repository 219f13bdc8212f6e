//! Outputs of the pipeline step: variables for later steps and the failure signal.

use std::{
    collections::BTreeMap,
    env,
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

use crate::Error;

pub trait PipelineOutputs {
    /// Publishes a variable for the steps that run after this one
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), Error>;

    /// Marks the step as failed with a short message
    fn set_failed(&mut self, message: &str);
}

/// Outputs written using the GitHub Actions workflow commands.
#[derive(Clone, Debug, Default)]
pub struct GithubActionsOutputs {
    output_file: Option<PathBuf>,
}

impl GithubActionsOutputs {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// Uses the file named by `GITHUB_OUTPUT` when the runner provides one
    pub fn from_env() -> Self {
        let output_file = env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self::new(output_file)
    }
}

impl PipelineOutputs for GithubActionsOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), Error> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{name}={value}")?;
            }
            None => println!("::set-output name={name}::{value}"),
        }

        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        println!("::error::{message}");
    }
}

/// Keeps outputs in memory, used when the flow is driven from tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingOutputs {
    pub outputs: BTreeMap<String, String>,
    pub failure: Option<String>,
}

impl PipelineOutputs for RecordingOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.outputs.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failure = Some(message.to_owned());
    }
}
