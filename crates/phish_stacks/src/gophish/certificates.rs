//! Per-domain certificates, listener associations and DNS records.

use serde_json::{json, Value};

use phish_cfn::intrinsic::{get_att, reference};
use phish_cfn::{Resource, ResourceType, Template};

use super::{ALB, HTTPS_LISTENER};
use crate::domains::{
    certificate_logical_id, listener_certificate_logical_id, record_group_logical_id, DomainEntry,
};
use crate::error::StackResult;
use crate::policy::association_policy;

fn alias_record(name: String) -> Value {
    json!({
        "Name": name,
        "Type": "A",
        "AliasTarget": {
            "HostedZoneId": get_att(ALB, "CanonicalHostedZoneID"),
            "DNSName": get_att(ALB, "DNSName")
        }
    })
}

/// Declare the certificate, the optional listener association and the
/// alias records for one domain.
pub(super) fn declare(template: &mut Template, entry: DomainEntry<'_>, zone_id: Value) -> StackResult<()> {
    let certificate = certificate_logical_id(entry.index);
    let www = entry.www_name();

    template.add_resource(
        certificate.as_str(),
        Resource::new(ResourceType::Certificate)
            .with("DomainName", entry.name)
            .with("ValidationMethod", "DNS")
            .with(
                "DomainValidationOptions",
                json!([
                    { "DomainName": entry.name, "HostedZoneId": zone_id },
                    { "DomainName": www, "HostedZoneId": zone_id }
                ]),
            )
            .with("SubjectAlternativeNames", json!([www])),
    )?;

    if association_policy(entry.index).needs_listener_certificate() {
        template.add_resource(
            listener_certificate_logical_id(entry.index),
            Resource::new(ResourceType::ListenerCertificate)
                .with(
                    "Certificates",
                    json!([{ "CertificateArn": reference(certificate.as_str()) }]),
                )
                .with("ListenerArn", reference(HTTPS_LISTENER)),
        )?;
    }

    template.add_resource(
        record_group_logical_id(entry.index),
        Resource::new(ResourceType::RecordSetGroup)
            .with("HostedZoneName", entry.zone_name())
            .with(
                "RecordSets",
                json!([alias_record(entry.name.to_string()), alias_record(www)]),
            ),
    )?;

    Ok(())
}
