use crate::accessors::IdentifierUtils;
use crate::error::AccessError;
use fhir_model::Patient;

/// Looks identifiers up on the patient itself.
///
/// When several identifiers share the system, the first non-blank one in
/// sequence order is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardIdentifierUtils;

impl IdentifierUtils for StandardIdentifierUtils {
    fn identifier(&self, patient: &Patient, system: &str) -> Result<String, AccessError> {
        let mut values = patient
            .identifier
            .iter()
            .filter(|i| i.has_system(system))
            .filter_map(|i| i.value.as_deref())
            .filter(|v| !v.trim().is_empty());

        let first = values
            .next()
            .ok_or_else(|| AccessError::not_found(format!("no identifier with system '{}'", system)))?;

        let others = values.count();
        if others > 0 {
            tracing::debug!(
                "{} further identifiers with system '{}' ignored",
                others,
                system
            );
        }
        Ok(first.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    const SYSTEM: &str = "http://example.ph/national-patient-id";

    fn patient(identifiers: serde_json::Value) -> Patient {
        Patient::from_value(&json!({ "identifier": identifiers })).unwrap()
    }

    #[test]
    fn test_identifier_by_system() {
        let p = patient(json!([
            {"system": "http://example.ph/patients", "value": "P-1"},
            {"system": SYSTEM, "value": "4719"}
        ]));
        assert_eq!(StandardIdentifierUtils.identifier(&p, SYSTEM).unwrap(), "4719");
    }

    #[test]
    fn test_first_match_wins() {
        let p = patient(json!([
            {"system": SYSTEM, "value": " "},
            {"system": SYSTEM, "value": "1001"},
            {"system": SYSTEM, "value": "1002"}
        ]));
        assert_eq!(StandardIdentifierUtils.identifier(&p, SYSTEM).unwrap(), "1001");
    }

    #[test]
    fn test_missing_system_is_not_found() {
        let p = patient(json!([{"value": "4719"}]));
        let err = StandardIdentifierUtils.identifier(&p, SYSTEM).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains(SYSTEM));
    }
}
