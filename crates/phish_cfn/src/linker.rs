//! Cross-template linkage.
//!
//! This module provides:
//! - A typed record of the exports a template produced, so that a consuming
//!   template imports them through a checked reference instead of a bare
//!   string
//! - Parameter values for a template, checked against its declarations and
//!   rendered as a CloudFormation parameter file

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{CfnError, CfnResult};
use crate::intrinsic::import_value;
use crate::template::Template;

/// One value exported by a producing template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedValue {
    /// Global export name.
    pub name: String,
    /// Logical id of the output carrying the export.
    pub output_id: String,
    /// Output description, if any.
    pub description: Option<String>,
}

/// Exports produced by one template, looked up by export name only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackExports {
    exports: Vec<ExportedValue>,
}

impl StackExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an export. Export names are global, so duplicates are rejected.
    pub fn add(&mut self, export: ExportedValue) -> CfnResult<()> {
        if self.get(&export.name).is_some() {
            return Err(CfnError::DuplicateExport(export.name));
        }
        self.exports.push(export);
        Ok(())
    }

    /// Collect every exported output of a template, in logical-id order.
    pub fn from_template(template: &Template) -> CfnResult<Self> {
        let mut exports = Self::new();
        for (id, output) in &template.outputs {
            if let Some(name) = output.export_name() {
                exports.add(ExportedValue {
                    name: name.to_string(),
                    output_id: id.clone(),
                    description: output.description.clone(),
                })?;
            }
        }
        Ok(exports)
    }

    pub fn get(&self, name: &str) -> Option<&ExportedValue> {
        self.exports.iter().find(|e| e.name == name)
    }

    /// Import expression for an export this template produced.
    pub fn import(&self, name: &str) -> CfnResult<Value> {
        match self.get(name) {
            Some(export) => {
                debug!("Importing {} (output {})", export.name, export.output_id);
                Ok(import_value(export.name.clone()))
            }
            None => Err(CfnError::UnknownExport(name.to_string())),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

/// One entry of a CloudFormation parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterValue {
    pub parameter_key: String,
    pub parameter_value: String,
}

/// Values supplied for a template's parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterValues {
    values: BTreeMap<String, String>,
}

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the values against a template's declared parameters.
    ///
    /// Unknown keys are an error. Returns the declared parameters that have
    /// neither a value nor a default.
    pub fn check(&self, template: &Template) -> CfnResult<Vec<String>> {
        if let Some(unknown) = self.values.keys().find(|k| template.parameter(k).is_none()) {
            return Err(CfnError::UnknownParameter(unknown.clone()));
        }

        let missing = template
            .parameters
            .iter()
            .filter(|(id, p)| p.default.is_none() && !self.values.contains_key(*id))
            .map(|(id, _)| id.clone())
            .collect();
        Ok(missing)
    }

    /// Render the `[{ParameterKey, ParameterValue}]` file, ordered by key.
    pub fn to_parameter_file(&self, template: &Template) -> CfnResult<String> {
        let missing = self.check(template)?;
        if !missing.is_empty() {
            debug!("Parameters left to the deploy-time caller: {:?}", missing);
        }

        let entries: Vec<ParameterValue> = self
            .values
            .iter()
            .map(|(k, v)| ParameterValue {
                parameter_key: k.clone(),
                parameter_value: v.clone(),
            })
            .collect();

        info!(
            "Rendered parameter file with {} values: {:?}",
            entries.len(),
            self.values.keys().collect::<Vec<_>>()
        );
        Ok(serde_json::to_string_pretty(&entries)?)
    }
}
