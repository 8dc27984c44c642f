//! Intrinsic function helpers.
//!
//! Each helper returns the JSON form CloudFormation expects in place of a
//! literal value. References are always by logical name; the orchestrator
//! resolves them at deploy time.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

/// Prefix shared by all CloudFormation pseudo parameters.
pub const PSEUDO_PARAMETER_PREFIX: &str = "AWS::";

/// `{"Ref": name}`
pub fn reference(name: impl Into<String>) -> Value {
    json!({ "Ref": name.into() })
}

/// `{"Fn::GetAtt": [resource, attribute]}`
pub fn get_att(resource: impl Into<String>, attribute: impl Into<String>) -> Value {
    json!({ "Fn::GetAtt": [resource.into(), attribute.into()] })
}

/// `{"Fn::Sub": text}`
pub fn sub(text: impl Into<String>) -> Value {
    json!({ "Fn::Sub": text.into() })
}

/// `{"Fn::Base64": value}`
pub fn base64(value: Value) -> Value {
    json!({ "Fn::Base64": value })
}

/// `{"Fn::ImportValue": export_name}`
pub fn import_value(export_name: impl Into<String>) -> Value {
    json!({ "Fn::ImportValue": export_name.into() })
}

fn sub_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ${!Literal} is an escape and never substituted
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^!}][^}]*)\}").expect("sub token pattern is valid"))
}

/// Extract the `${Name}` substitution tokens from an `Fn::Sub` string, in
/// order of appearance.
pub fn sub_tokens(text: &str) -> Vec<String> {
    sub_token_pattern()
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Whether a name refers to a pseudo parameter such as `AWS::StackName`.
pub fn is_pseudo_parameter(name: &str) -> bool {
    name.starts_with(PSEUDO_PARAMETER_PREFIX)
}
