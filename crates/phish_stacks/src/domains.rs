//! The ordered domain list shared by both generators.
//!
//! A domain's position in the list decides every logical id and export
//! name derived from it, so the hosted-zone stack and the Gophish stack
//! must be generated from the same list.

use serde::{Deserialize, Serialize};

/// Logical id of the hosted zone for domain `index`.
pub fn hosted_zone_logical_id(index: usize) -> String {
    format!("Domain{}", index)
}

/// Export name carrying the hosted zone id for domain `index`.
pub fn hosted_zone_export_name(index: usize) -> String {
    format!("GophishHostedZoneId{}", index)
}

pub fn certificate_logical_id(index: usize) -> String {
    format!("ACMAlbCertificate{}", index)
}

pub fn listener_certificate_logical_id(index: usize) -> String {
    format!("ALBAlbListenerCertificate{}", index)
}

pub fn record_group_logical_id(index: usize) -> String {
    format!("R53AlbRecordGroup{}", index)
}

/// Ordered list of domain names. Entries are passed through uninterpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainList(Vec<String>);

impl DomainList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(domains.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|d| d.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = DomainEntry<'_>> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, name)| DomainEntry { index, name })
    }
}

/// A domain together with its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainEntry<'a> {
    pub index: usize,
    pub name: &'a str,
}

impl DomainEntry<'_> {
    pub fn www_name(&self) -> String {
        format!("www.{}", self.name)
    }

    /// Fully qualified hosted zone name, with the trailing dot.
    pub fn zone_name(&self) -> String {
        format!("{}.", self.name)
    }
}
