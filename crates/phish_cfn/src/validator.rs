//! Local template validation.
//!
//! These checks are advisory. The deployment engine stays the authority on
//! whether a template applies; this catches dangling references and limit
//! violations before a template ever leaves the machine.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, info};

use crate::intrinsic::{is_pseudo_parameter, sub_tokens};
use crate::template::Template;

pub const MAX_RESOURCES: usize = 500;
pub const MAX_PARAMETERS: usize = 200;
pub const MAX_OUTPUTS: usize = 200;

/// Validation report for a template.
#[derive(Debug)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
    pub passed: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            passed: true,
        }
    }

    pub fn add_check(&mut self, name: &str, passed: bool, message: &str) {
        if !passed {
            self.passed = false;
        }
        self.checks.push(ValidationCheck {
            name: name.to_string(),
            passed,
            message: message.to_string(),
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ValidationCheck {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

/// References found while walking a template.
#[derive(Debug, Default)]
struct References {
    refs: BTreeSet<String>,
    get_atts: BTreeSet<String>,
    /// Tokens of each `Fn::Sub`, minus the names bound by its variable map.
    sub_tokens: BTreeSet<String>,
}

impl References {
    fn collect(value: &Value, out: &mut Self) {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(target)) = map.get("Ref") {
                    out.refs.insert(target.clone());
                }
                if let Some(Value::Array(parts)) = map.get("Fn::GetAtt") {
                    if let Some(Value::String(resource)) = parts.first() {
                        out.get_atts.insert(resource.clone());
                    }
                }
                match map.get("Fn::Sub") {
                    Some(Value::String(text)) => out.sub_tokens.extend(sub_tokens(text)),
                    Some(Value::Array(parts)) => {
                        if let Some(Value::String(text)) = parts.first() {
                            let bound: BTreeSet<&str> = parts
                                .get(1)
                                .and_then(Value::as_object)
                                .map(|vars| vars.keys().map(|k| k.as_str()).collect())
                                .unwrap_or_default();
                            out.sub_tokens.extend(
                                sub_tokens(text)
                                    .into_iter()
                                    .filter(|t| !bound.contains(t.as_str())),
                            );
                        }
                    }
                    _ => {}
                }
                for nested in map.values() {
                    Self::collect(nested, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    Self::collect(item, out);
                }
            }
            _ => {}
        }
    }
}

/// Validator for assembled templates.
pub struct TemplateValidator;

impl TemplateValidator {
    /// Run every local check against a template.
    pub fn validate(template: &Template) -> ValidationReport {
        info!("Validating template: {}", template.description);
        let mut report = ValidationReport::new();

        let mut refs = References::default();
        for resource in template.resources.values() {
            for value in resource.properties.values() {
                References::collect(value, &mut refs);
            }
        }
        for output in template.outputs.values() {
            References::collect(&output.value, &mut refs);
        }
        debug!(
            "Found {} refs, {} attribute lookups, {} sub tokens",
            refs.refs.len(),
            refs.get_atts.len(),
            refs.sub_tokens.len()
        );

        let dangling: Vec<&str> = refs
            .refs
            .iter()
            .map(|r| r.as_str())
            .filter(|r| !is_pseudo_parameter(r) && !template.declares(r))
            .collect();
        Self::record(&mut report, "refs", &dangling, "All Ref targets are declared");

        let dangling: Vec<&str> = refs
            .get_atts
            .iter()
            .map(|r| r.as_str())
            .filter(|r| template.resource(r).is_none())
            .collect();
        Self::record(&mut report, "get_att", &dangling, "All Fn::GetAtt targets are declared resources");

        let tokens: Vec<&str> = refs.sub_tokens.iter().map(|t| t.as_str()).collect();
        let dangling = Self::unresolved_tokens(template, &tokens);
        Self::record(&mut report, "sub", &dangling, "All Fn::Sub tokens resolve");

        Self::check_limits(template, &mut report);
        Self::check_exports(template, &mut report);

        report
    }

    fn unresolved_tokens<'a>(template: &Template, tokens: &[&'a str]) -> Vec<&'a str> {
        tokens
            .iter()
            .copied()
            .filter(|token| match token.split_once('.') {
                Some((resource, _)) => template.resource(resource).is_none(),
                None => !is_pseudo_parameter(token) && !template.declares(token),
            })
            .collect()
    }

    fn record(report: &mut ValidationReport, name: &str, dangling: &[&str], ok: &str) {
        if dangling.is_empty() {
            report.add_check(name, true, ok);
        } else {
            report.add_check(name, false, &format!("Unresolved: {}", dangling.join(", ")));
        }
    }

    fn check_limits(template: &Template, report: &mut ValidationReport) {
        let sections = [
            ("resources", template.resources.len(), MAX_RESOURCES),
            ("parameters", template.parameters.len(), MAX_PARAMETERS),
            ("outputs", template.outputs.len(), MAX_OUTPUTS),
        ];
        let over: Vec<String> = sections
            .iter()
            .filter(|(_, count, max)| count > max)
            .map(|(name, count, max)| format!("{} {} > {}", name, count, max))
            .collect();

        if over.is_empty() {
            report.add_check("limits", true, "Within CloudFormation section limits");
        } else {
            report.add_check("limits", false, &over.join("; "));
        }
    }

    fn check_exports(template: &Template, report: &mut ValidationReport) {
        let mut seen = BTreeSet::new();
        let duplicates: Vec<&str> = template
            .outputs
            .values()
            .filter_map(|o| o.export_name())
            .filter(|name| !seen.insert(*name))
            .collect();
        Self::record(report, "exports", &duplicates, "Export names are unique");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intrinsic::{get_att, reference, sub};
    use crate::parameter::{Parameter, ParameterType};
    use crate::resource::{Resource, ResourceType};
    use crate::template::Output;
    use serde_json::json;

    fn check<'a>(report: &'a ValidationReport, name: &str) -> &'a ValidationCheck {
        report.checks.iter().find(|c| c.name == name).unwrap()
    }

    fn base() -> Template {
        let mut t = Template::new("Test");
        t.add_parameter("VpcId", Parameter::new(ParameterType::VpcId, "VPC")).unwrap();
        t.add_resource(
            "SG",
            Resource::new(ResourceType::SecurityGroup).with("VpcId", reference("VpcId")),
        )
        .unwrap();
        t
    }

    #[test]
    fn test_valid_template_passes() {
        let mut t = base();
        t.add_resource(
            "ALB",
            Resource::new(ResourceType::LoadBalancer)
                .with("SecurityGroups", json!([reference("SG")]))
                .with("Name", sub("${AWS::StackName}-ALB")),
        )
        .unwrap();
        t.add_output("Dns", Output::new(get_att("ALB", "DNSName"))).unwrap();

        let report = TemplateValidator::validate(&t);
        assert!(report.passed, "{:?}", report.checks);
    }

    #[test]
    fn test_dangling_ref_fails() {
        let mut t = base();
        t.add_resource(
            "ALB",
            Resource::new(ResourceType::LoadBalancer).with("SecurityGroups", json!([reference("Missing")])),
        )
        .unwrap();

        let report = TemplateValidator::validate(&t);
        assert!(!report.passed);
        assert!(check(&report, "refs").message.contains("Missing"));
    }

    #[test]
    fn test_dangling_get_att_fails() {
        let mut t = base();
        t.add_output("Dns", Output::new(get_att("Nope", "DNSName"))).unwrap();

        let report = TemplateValidator::validate(&t);
        assert!(!check(&report, "get_att").passed);
    }

    #[test]
    fn test_sub_tokens_checked() {
        let mut t = base();
        t.add_resource(
            "LC",
            Resource::new(ResourceType::LaunchConfiguration)
                .with("UserData", sub("port=${AdminPort} vpc=${VpcId} sg=${SG.GroupId}")),
        )
        .unwrap();

        let report = TemplateValidator::validate(&t);
        let sub_check = check(&report, "sub");
        assert!(!sub_check.passed);
        assert_eq!(sub_check.message, "Unresolved: AdminPort");
    }

    #[test]
    fn test_sub_variable_map_binds_names() {
        let mut t = base();
        t.add_resource(
            "LC",
            Resource::new(ResourceType::LaunchConfiguration)
                .with("UserData", json!({ "Fn::Sub": ["${Local}", { "Local": "x" }] })),
        )
        .unwrap();

        assert!(check(&TemplateValidator::validate(&t), "sub").passed);
    }

    #[test]
    fn test_section_limits_enforced() {
        let mut t = Template::new("Large");
        for i in 0..=MAX_RESOURCES {
            t.add_resource(format!("Zone{}", i), Resource::new(ResourceType::HostedZone))
                .unwrap();
        }
        for i in 0..=MAX_OUTPUTS {
            t.add_output(format!("ZoneId{}", i), Output::new(reference(format!("Zone{}", i))))
                .unwrap();
        }

        let report = TemplateValidator::validate(&t);
        assert!(!report.passed);
        let limits = check(&report, "limits");
        assert!(!limits.passed);
        assert!(limits.message.contains("resources 501 > 500"), "{}", limits.message);
        assert!(limits.message.contains("outputs 201 > 200"), "{}", limits.message);
        assert!(!limits.message.contains("parameters"));
    }

    #[test]
    fn test_within_limits_passes() {
        assert!(check(&TemplateValidator::validate(&base()), "limits").passed);
    }

    #[test]
    fn test_duplicate_exports_fail() {
        let mut t = base();
        t.add_output("A", Output::new(reference("SG")).exported_as("Same")).unwrap();
        t.add_output("B", Output::new(reference("SG")).exported_as("Same")).unwrap();

        assert!(!check(&TemplateValidator::validate(&t), "exports").passed);
    }
}
