//! Contract signing submissions.
//!
//! A submission is accepted only when every gate passes: a drawn signature,
//! initials applied to all sections, both consent boxes ticked, a signer
//! name, and every required template field filled. Each unmet gate yields
//! its own message so the client can show them all at once.

use serde::Deserialize;

use crate::contract_template::{initials_from_name, ContractTemplate, FieldValues};
use crate::error::CoreError;
use crate::signature::{decode_signature, SignatureImage};

pub const MSG_SIGNATURE_MISSING: &str = "Please provide your signature";
pub const MSG_INITIALS_MISSING: &str = "Please apply your initials to all sections";
pub const MSG_TERMS_NOT_ACCEPTED: &str = "You must agree to the terms of the agreement";
pub const MSG_ELECTRONIC_NOT_ACCEPTED: &str = "You must consent to signing electronically";
pub const MSG_SIGNER_NAME_MISSING: &str = "Please enter your full legal name";

/// Body of a signing request (client contracts and affiliate contracts alike).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningSubmission {
    /// PNG data URI of the signature canvas.
    pub signature: Option<String>,
    /// Set by the client's "Apply Initials" action.
    #[serde(default)]
    pub initials_applied: bool,
    #[serde(default)]
    pub agree_terms: bool,
    #[serde(default)]
    pub agree_electronic: bool,
    #[serde(default)]
    pub signer_name: String,
    #[serde(default)]
    pub fields: FieldValues,
}

/// A submission that passed every gate, ready to persist.
#[derive(Debug, Clone)]
pub struct AcceptedSignature {
    pub signer_name: String,
    pub initials: String,
    pub signature: SignatureImage,
    pub fields: FieldValues,
}

impl SigningSubmission {
    /// Every unmet condition, in display order. Empty when the submission is complete.
    pub fn unmet_conditions(&self, template: &ContractTemplate) -> Vec<String> {
        let mut issues = Vec::new();

        let signature_ok = self
            .signature
            .as_deref()
            .is_some_and(|uri| decode_signature(uri).is_ok());
        if !signature_ok {
            issues.push(MSG_SIGNATURE_MISSING.to_string());
        }
        if !self.initials_applied {
            issues.push(MSG_INITIALS_MISSING.to_string());
        }
        if !self.agree_terms {
            issues.push(MSG_TERMS_NOT_ACCEPTED.to_string());
        }
        if !self.agree_electronic {
            issues.push(MSG_ELECTRONIC_NOT_ACCEPTED.to_string());
        }
        if self.signer_name.trim().is_empty() {
            issues.push(MSG_SIGNER_NAME_MISSING.to_string());
        }
        for label in template.missing_required(&self.fields) {
            issues.push(format!("{label} is required"));
        }

        issues
    }

    /// Check every gate and return the decoded signature, or
    /// [`CoreError::Incomplete`] listing each unmet condition.
    pub fn accept(self, template: &ContractTemplate) -> Result<AcceptedSignature, CoreError> {
        let issues = self.unmet_conditions(template);
        if !issues.is_empty() {
            return Err(CoreError::Incomplete(issues));
        }

        let signature = decode_signature(self.signature.as_deref().unwrap_or_default())?;
        let signer_name = self.signer_name.trim().to_string();
        Ok(AcceptedSignature {
            initials: initials_from_name(&signer_name),
            fields: template.retain_known(self.fields),
            signer_name,
            signature,
        })
    }
}
