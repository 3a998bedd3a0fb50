//! Affiliate onboarding paperwork: W-9 and NDA.
//!
//! Full taxpayer identification numbers never leave this module. A
//! submission is reduced to the last four digits (for display) and an
//! HMAC-SHA256 digest under a server-held key (for matching) before it
//! reaches storage. Without the key the digest cannot be brute-forced back
//! to the nine digits.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::CoreError;
use crate::hashing::hmac_sha256_hex;
use crate::signature::is_signature_present;

static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid regex"));
static STATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

/// Federal tax classifications offered on the W-9 form.
pub const TAX_CLASSIFICATIONS: &[&str] = &[
    "individual",
    "c_corporation",
    "s_corporation",
    "partnership",
    "trust_estate",
    "llc",
    "other",
];

/// Body of `POST /affiliate/submit-w9`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct W9Submission {
    pub legal_name: String,
    pub business_name: Option<String>,
    pub tax_classification: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// SSN or EIN, with or without dashes.
    pub tin: String,
    pub signature: Option<String>,
}

/// A validated W-9 with the TIN reduced to storable parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct W9Record {
    pub legal_name: String,
    pub business_name: Option<String>,
    pub tax_classification: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub tin_last4: String,
    pub tin_hash: String,
}

/// Strip separators and require exactly nine digits.
pub fn normalize_tin(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect();
    if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "TIN must contain exactly 9 digits".into(),
        ));
    }
    Ok(digits)
}

impl W9Submission {
    /// Validate every field, collecting one message per problem.
    ///
    /// `tin_key` keys the stored TIN digest.
    pub fn into_record(self, tin_key: &[u8]) -> Result<W9Record, CoreError> {
        let mut issues = Vec::new();

        if self.legal_name.trim().is_empty() {
            issues.push("Legal name is required".to_string());
        }
        if !TAX_CLASSIFICATIONS.contains(&self.tax_classification.as_str()) {
            issues.push(format!(
                "Tax classification must be one of: {}",
                TAX_CLASSIFICATIONS.join(", ")
            ));
        }
        if self.address_line.trim().is_empty() || self.city.trim().is_empty() {
            issues.push("Street address and city are required".to_string());
        }
        let state = self.state.trim().to_uppercase();
        if !STATE_RE.is_match(&state) {
            issues.push("State must be a two-letter code".to_string());
        }
        if !ZIP_RE.is_match(self.zip.trim()) {
            issues.push("ZIP code must be 5 digits".to_string());
        }
        let tin = normalize_tin(&self.tin);
        if let Err(CoreError::Validation(msg)) = &tin {
            issues.push(msg.clone());
        }
        if !is_signature_present(self.signature.as_deref()) {
            issues.push("Please sign the certification".to_string());
        }

        if !issues.is_empty() {
            return Err(CoreError::Incomplete(issues));
        }
        let tin = tin?;

        Ok(W9Record {
            legal_name: self.legal_name.trim().to_string(),
            business_name: self
                .business_name
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            tax_classification: self.tax_classification,
            address_line: self.address_line.trim().to_string(),
            city: self.city.trim().to_string(),
            state,
            zip: self.zip.trim().to_string(),
            tin_last4: tin[5..].to_string(),
            tin_hash: hmac_sha256_hex(tin_key, tin.as_bytes()),
        })
    }
}

/// Body of `POST /affiliate/sign-nda`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdaSubmission {
    pub signer_name: String,
    pub signature: Option<String>,
    #[serde(default)]
    pub agree: bool,
}

impl NdaSubmission {
    /// Returns the trimmed signer name and the signature digest.
    pub fn accept(self) -> Result<(String, String), CoreError> {
        let mut issues = Vec::new();
        if self.signer_name.trim().is_empty() {
            issues.push("Please enter your full legal name".to_string());
        }
        let signature = self
            .signature
            .as_deref()
            .map(crate::signature::decode_signature);
        if !matches!(signature, Some(Ok(_))) {
            issues.push("Please provide your signature".to_string());
        }
        if !self.agree {
            issues.push("You must agree to the non-disclosure terms".to_string());
        }
        match signature {
            Some(Ok(sig)) if issues.is_empty() => Ok((self.signer_name.trim().to_string(), sig.sha256)),
            _ => Err(CoreError::Incomplete(issues)),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::hashing::sha256_hex;
    use crate::signature::test_images;

    const KEY: &[u8] = b"test-tin-key";

    fn submission() -> W9Submission {
        W9Submission {
            legal_name: "Jane Doe".into(),
            business_name: Some("  ".into()),
            tax_classification: "individual".into(),
            address_line: "100 Main St".into(),
            city: "Austin".into(),
            state: "tx".into(),
            zip: "78701".into(),
            tin: "123-45-6789".into(),
            signature: Some(test_images::inked()),
        }
    }

    #[test]
    fn valid_w9_keeps_only_last_four() {
        let record = submission().into_record(KEY).unwrap();
        assert_eq!(record.tin_last4, "6789");
        assert_eq!(record.tin_hash, hmac_sha256_hex(KEY, b"123456789"));
        assert_ne!(record.tin_hash, sha256_hex(b"123456789"));
        assert_eq!(record.state, "TX");
        assert_eq!(record.business_name, None);
    }

    #[test]
    fn tin_normalization() {
        assert_eq!(normalize_tin("12-3456789").unwrap(), "123456789");
        assert!(normalize_tin("12345678").is_err());
        assert!(normalize_tin("12345678a").is_err());
    }

    #[test]
    fn problems_are_collected() {
        let mut s = submission();
        s.tin = "123".into();
        s.zip = "787".into();
        s.signature = None;
        assert_matches!(s.into_record(KEY), Err(CoreError::Incomplete(issues)) if issues.len() == 3);
    }

    #[test]
    fn tin_digest_is_keyed() {
        let a = submission().into_record(b"key-a").unwrap();
        let b = submission().into_record(b"key-b").unwrap();
        assert_ne!(a.tin_hash, b.tin_hash);
    }

    #[test]
    fn zip_must_be_five_digits() {
        let mut s = submission();
        s.zip = "78701-1234".into();
        assert_matches!(
            s.into_record(KEY),
            Err(CoreError::Incomplete(issues)) if issues == vec!["ZIP code must be 5 digits".to_string()]
        );
    }

    #[test]
    fn nda_requires_agreement_and_signature() {
        let nda = NdaSubmission {
            signer_name: "Jane Doe".into(),
            signature: Some(test_images::inked()),
            agree: true,
        };
        let (name, digest) = nda.accept().unwrap();
        assert_eq!(name, "Jane Doe");
        assert_eq!(digest.len(), 64);

        let nda = NdaSubmission {
            signer_name: " ".into(),
            signature: None,
            agree: false,
        };
        assert_matches!(nda.accept(), Err(CoreError::Incomplete(issues)) if issues.len() == 3);
    }
}
