//! Evaluates the mapping table against one patient record.
//!
//! Rules never read each other's output, so the table order only decides the
//! order of evaluation, never the result. The first failing rule aborts the
//! invocation and no record is returned.

use crate::accessors::AccessorSet;
use crate::error::{MappingError, Result, TableError};
use fhir_model::Patient;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

pub mod record;
pub mod table;

pub use record::{FieldValue, OutputRecord};
pub use table::{Extractor, FieldRule, TargetField, STANDARD_RULES};

#[derive(Debug, Clone)]
pub struct Mapper {
    rules: Cow<'static, [FieldRule]>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// Mapper over the standard table.
    pub fn new() -> Self {
        Self {
            rules: Cow::Borrowed(STANDARD_RULES),
        }
    }

    /// Mapper over a caller-supplied table.
    ///
    /// The table must hold exactly one rule per target field, and the
    /// coordinates slot must be fed by a location rule.
    pub fn with_rules(rules: Vec<FieldRule>) -> std::result::Result<Self, TableError> {
        validate_rules(&rules)?;
        Ok(Self {
            rules: Cow::Owned(rules),
        })
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn map(&self, input: &Patient, accessors: &AccessorSet) -> Result<OutputRecord> {
        let mut record = OutputRecord::default();

        for rule in self.rules.iter() {
            let value = match rule.extract {
                Extractor::Text(f) => f(input, accessors).map(FieldValue::Text),
                Extractor::Location(f) => f(input, accessors).map(FieldValue::Location),
            }
            .map_err(|source| MappingError::for_field(rule.field, source))?;

            tracing::debug!(field = rule.field.name(), value = ?value, "Mapped field");
            record.set(rule.field, value);
        }

        if let Some(location) = record.coordinates() {
            tracing::debug!("Patient {:?} located at {}", input.id, location);
        }
        Ok(record)
    }

    /// Read a FHIR JSON Patient and map it.
    pub fn map_json(&self, input: &Value, accessors: &AccessorSet) -> Result<OutputRecord> {
        let patient = Patient::from_value(input)?;
        self.map(&patient, accessors)
    }
}

/// Map with the standard table.
pub fn map(input: &Patient, accessors: &AccessorSet) -> Result<OutputRecord> {
    Mapper::new().map(input, accessors)
}

fn validate_rules(rules: &[FieldRule]) -> std::result::Result<(), TableError> {
    let mut seen = BTreeSet::new();
    for rule in rules {
        if !seen.insert(rule.field) {
            return Err(TableError::DuplicateField(rule.field));
        }
        let is_location = matches!(rule.extract, Extractor::Location(_));
        if is_location != rule.field.is_location() {
            return Err(TableError::WrongKind(rule.field));
        }
    }
    match TargetField::ALL.into_iter().find(|f| !seen.contains(f)) {
        Some(missing) => Err(TableError::MissingField(missing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AccessError;

    fn accessors() -> AccessorSet {
        AccessorSet::from_config(&Config::default())
    }

    fn constant(_: &Patient, _: &AccessorSet) -> std::result::Result<Option<String>, AccessError> {
        Ok(Some("x".into()))
    }

    #[test]
    fn test_standard_table_is_valid() {
        assert!(validate_rules(STANDARD_RULES).is_ok());
        assert_eq!(Mapper::new().rules().len(), TargetField::ALL.len());
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let mut rules = STANDARD_RULES.to_vec();
        rules.push(FieldRule::text(TargetField::Gender, constant));
        assert_eq!(
            Mapper::with_rules(rules).unwrap_err(),
            TableError::DuplicateField(TargetField::Gender)
        );
    }

    #[test]
    fn test_missing_rule_rejected() {
        let rules: Vec<FieldRule> = STANDARD_RULES
            .iter()
            .copied()
            .filter(|r| r.field != TargetField::Country)
            .collect();
        assert_eq!(
            Mapper::with_rules(rules).unwrap_err(),
            TableError::MissingField(TargetField::Country)
        );
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let rules: Vec<FieldRule> = STANDARD_RULES
            .iter()
            .copied()
            .map(|r| {
                if r.field == TargetField::Coordinates {
                    FieldRule::text(TargetField::Coordinates, constant)
                } else {
                    r
                }
            })
            .collect();
        assert_eq!(
            Mapper::with_rules(rules).unwrap_err(),
            TableError::WrongKind(TargetField::Coordinates)
        );
    }

    #[test]
    fn test_first_failure_aborts() {
        // No managing organization and no identifier: the organization rule runs first.
        let err = Mapper::new()
            .map(&Patient::default(), &accessors())
            .unwrap_err();
        assert_eq!(err.field, Some(TargetField::OrganizationUnitId));
    }

    #[test]
    fn test_map_json_rejects_other_resources() {
        let err = Mapper::new()
            .map_json(&serde_json::json!({"resourceType": "Observation"}), &accessors())
            .unwrap_err();
        assert_eq!(err.field, None);
        assert_eq!(err.kind(), crate::error::ErrorKind::Malformed);
    }
}
