use crate::accessors::OrganizationUtils;
use crate::error::AccessError;
use fhir_model::Reference;
use std::collections::BTreeMap;

const ORGANIZATION: &str = "Organization";

/// Resolves organization codes through a configured directory.
///
/// The code is the value of the reference's logical identifier in the
/// requested code system, with `code_prefix` prepended.
#[derive(Debug, Clone, Default)]
pub struct DirectoryOrganizationUtils {
    code_prefix: String,
    units: BTreeMap<String, String>,
}

impl DirectoryOrganizationUtils {
    pub fn new(code_prefix: impl Into<String>, units: BTreeMap<String, String>) -> Self {
        Self {
            code_prefix: code_prefix.into(),
            units,
        }
    }

    pub fn exists(&self, code: &str) -> bool {
        self.units.contains_key(code)
    }
}

impl OrganizationUtils for DirectoryOrganizationUtils {
    fn organization_unit_id(
        &self,
        reference: Option<&Reference>,
        code_system: &str,
    ) -> Result<String, AccessError> {
        let reference = reference
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AccessError::not_found("patient has no managing organization"))?;

        if let Some(resource_type) = reference.resource_type() {
            if resource_type != ORGANIZATION {
                return Err(AccessError::malformed(format!(
                    "managing organization refers to a {} resource",
                    resource_type
                )));
            }
        }

        let code = reference
            .identifier
            .as_ref()
            .filter(|i| i.has_system(code_system))
            .and_then(|i| i.value.as_deref())
            .filter(|v| !v.trim().is_empty());

        let Some(code) = code else {
            if reference.is_contained() {
                return Err(AccessError::malformed(format!(
                    "contained reference '{}' carries no organization identifier",
                    reference.reference.as_deref().unwrap_or_default()
                )));
            }
            return Err(AccessError::not_found(format!(
                "managing organization has no identifier with system '{}'",
                code_system
            )));
        };

        let code = format!("{}{}", self.code_prefix, code);
        match self.units.get(&code) {
            Some(id) => {
                tracing::debug!("Organization code '{}' resolved to unit '{}'", code, id);
                Ok(id.clone())
            }
            None => Err(AccessError::not_found(format!(
                "no organization unit for code '{}'",
                code
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    const SYSTEM: &str = "http://example.ph/organizations";

    fn directory(prefix: &str) -> DirectoryOrganizationUtils {
        let mut units = BTreeMap::new();
        units.insert(format!("{}PHL-D-1", prefix), "ldXIdLNUNEn".to_string());
        DirectoryOrganizationUtils::new(prefix, units)
    }

    fn reference(v: serde_json::Value) -> Reference {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_resolves_identifier_code() {
        let r = reference(json!({
            "reference": "Organization/d1",
            "identifier": {"system": SYSTEM, "value": "PHL-D-1"}
        }));
        assert_eq!(
            directory("").organization_unit_id(Some(&r), SYSTEM).unwrap(),
            "ldXIdLNUNEn"
        );
    }

    #[test]
    fn test_code_prefix_applied() {
        let r = reference(json!({"identifier": {"system": SYSTEM, "value": "PHL-D-1"}}));
        let d = directory("OU_");
        assert!(d.exists("OU_PHL-D-1"));
        assert_eq!(d.organization_unit_id(Some(&r), SYSTEM).unwrap(), "ldXIdLNUNEn");
    }

    #[test]
    fn test_absent_reference_is_not_found() {
        let err = directory("").organization_unit_id(None, SYSTEM).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let empty = Reference::default();
        let err = directory("").organization_unit_id(Some(&empty), SYSTEM).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_other_system_or_unknown_code_is_not_found() {
        let r = reference(json!({"identifier": {"system": "http://other", "value": "PHL-D-1"}}));
        let err = directory("").organization_unit_id(Some(&r), SYSTEM).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let r = reference(json!({"identifier": {"system": SYSTEM, "value": "PHL-D-9"}}));
        let err = directory("").organization_unit_id(Some(&r), SYSTEM).unwrap_err();
        assert_eq!(err, AccessError::NotFound("no organization unit for code 'PHL-D-9'".into()));
    }

    #[test]
    fn test_non_organization_reference_is_malformed() {
        let r = reference(json!({
            "reference": "Location/l1",
            "identifier": {"system": SYSTEM, "value": "PHL-D-1"}
        }));
        let err = directory("").organization_unit_id(Some(&r), SYSTEM).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let r = reference(json!({
            "reference": "Location/l1",
            "type": "Organization",
            "identifier": {"system": SYSTEM, "value": "PHL-D-1"}
        }));
        let err = directory("").organization_unit_id(Some(&r), SYSTEM).unwrap_err();
        assert_eq!(
            err,
            AccessError::Malformed("managing organization refers to a Location resource".into())
        );
    }

    #[test]
    fn test_bare_contained_reference_is_malformed() {
        let r = reference(json!({"reference": "#org"}));
        let err = directory("").organization_unit_id(Some(&r), SYSTEM).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
