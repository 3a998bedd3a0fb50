//! Structured contract templates.
//!
//! A template is an ordered list of sections. Each section is a sequence of
//! segments that are either literal text or a typed input field. Rendering
//! substitutes field values into the sequence, so no markup is ever parsed
//! or patched.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Input kinds that may appear inside a contract body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Initials,
}

/// A fillable slot in the contract body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// One piece of a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Field(FieldSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub heading: String,
    pub segments: Vec<Segment>,
}

/// A complete contract body as stored in the `body` JSONB column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTemplate {
    pub title: String,
    pub sections: Vec<Section>,
}

/// Field values keyed by [`FieldSpec::key`].
pub type FieldValues = BTreeMap<String, String>;

impl ContractTemplate {
    /// Parse a stored JSON body.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        let template: Self = serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Validation(format!("Invalid contract body: {e}")))?;
        template.check_structure()?;
        Ok(template)
    }

    /// Reject templates with no sections or duplicate field keys.
    pub fn check_structure(&self) -> Result<(), CoreError> {
        if self.sections.is_empty() {
            return Err(CoreError::Validation(
                "Contract must have at least one section".into(),
            ));
        }
        let mut seen = HashSet::new();
        for field in self.fields() {
            if field.key.trim().is_empty() {
                return Err(CoreError::Validation("Contract field key cannot be empty".into()));
            }
            if !seen.insert(field.key.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate contract field key '{}'",
                    field.key
                )));
            }
        }
        Ok(())
    }

    /// Every field in document order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections
            .iter()
            .flat_map(|s| s.segments.iter())
            .filter_map(|seg| match seg {
                Segment::Field(field) => Some(field),
                Segment::Text { .. } => None,
            })
    }

    /// Labels of required fields that are missing or blank in `values`.
    ///
    /// Initials slots are excluded; they are covered by the initials flag.
    pub fn missing_required(&self, values: &FieldValues) -> Vec<&str> {
        self.fields()
            .filter(|f| f.required && f.kind != FieldKind::Initials)
            .filter(|f| values.get(&f.key).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.label.as_str())
            .collect()
    }

    /// Keep only values whose key names a field in this template.
    pub fn retain_known(&self, values: FieldValues) -> FieldValues {
        let known: HashSet<&str> = self.fields().map(|f| f.key.as_str()).collect();
        values
            .into_iter()
            .filter(|(k, _)| known.contains(k.as_str()))
            .collect()
    }

    /// Render the filled contract as plain text paragraphs, one per section.
    ///
    /// Blank fields render as a run of underscores; initials render as the
    /// signer's initials when provided.
    pub fn render_text(&self, values: &FieldValues, initials: Option<&str>) -> Vec<(String, String)> {
        self.sections
            .iter()
            .map(|section| {
                let body: String = section
                    .segments
                    .iter()
                    .map(|seg| match seg {
                        Segment::Text { text } => text.clone(),
                        Segment::Field(field) if field.kind == FieldKind::Initials => {
                            format!("[{}]", initials.unwrap_or("____"))
                        }
                        Segment::Field(field) => values
                            .get(&field.key)
                            .filter(|v| !v.trim().is_empty())
                            .cloned()
                            .unwrap_or_else(|| "__________".to_string()),
                    })
                    .collect();
                (section.heading.clone(), body)
            })
            .collect()
    }
}

/// Initials derived from a full name: first letter of each word, upper-cased.
pub fn initials_from_name(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
