use lazy_static::lazy_static;
use regex::Regex;

use crate::pipeline::PipelineOutputs;
use crate::Error;

/// Name of the pipeline output the resource name is published under
pub const RESOURCE_NAME_OUTPUT: &str = "RESOURCE_NAME";

// A slash, a word, then a backslash or a double quote. `\w` is spelled out since the
// job output is matched on ASCII word characters only.
const RESOURCE_NAME_REGEX_STR: &str = r#"(/([0-9A-Za-z_]+)\\)|(/([0-9A-Za-z_]+)")"#;

lazy_static! {
    static ref RESOURCE_NAME_REGEX: Regex = Regex::new(RESOURCE_NAME_REGEX_STR).unwrap();
}

/// Finds the last slash delimited word in the job output, e.g. the final segment of
/// an Azure resource id printed by the playbook.
pub fn extract_resource_name(output: &str) -> Option<&str> {
    let found = RESOURCE_NAME_REGEX.find_iter(output).last()?.as_str();

    // Both the leading slash and the trailing delimiter are a single byte
    Some(&found[1..found.len() - 1])
}

/// Publishes the resource name found in the output, if any. A missing name is not an error.
pub fn export_resource_name(
    output: &str,
    outputs: &mut dyn PipelineOutputs,
) -> Result<Option<String>, Error> {
    match extract_resource_name(output) {
        Some(resource_name) => {
            outputs.set_output(RESOURCE_NAME_OUTPUT, resource_name)?;
            tracing::info!("Resource name exported: {}", resource_name);
            Ok(Some(resource_name.to_owned()))
        }
        None => {
            tracing::warn!("No resource name exported as output variable.");
            Ok(None)
        }
    }
}
