//! How each domain's certificate is attached to the HTTPS listener.

use serde::{Deserialize, Serialize};

/// Association of a domain certificate with the HTTPS listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateAssociation {
    /// Declared on the listener itself as its default certificate.
    Primary,
    /// Attached through a separate listener-certificate resource.
    Additional,
}

impl CertificateAssociation {
    pub fn needs_listener_certificate(&self) -> bool {
        matches!(self, CertificateAssociation::Additional)
    }
}

/// The first domain's certificate is the listener default; every later one
/// is an additional association. Declaring index 0 twice would attach the
/// same certificate to the listener twice.
pub fn association_policy(index: usize) -> CertificateAssociation {
    if index == 0 {
        CertificateAssociation::Primary
    } else {
        CertificateAssociation::Additional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_domain_is_primary() {
        assert_eq!(association_policy(0), CertificateAssociation::Primary);
        assert!(!association_policy(0).needs_listener_certificate());
    }

    #[test]
    fn test_later_domains_are_additional() {
        for index in 1..5 {
            assert_eq!(association_policy(index), CertificateAssociation::Additional);
            assert!(association_policy(index).needs_listener_certificate());
        }
    }
}
