//! Accessor collaborators used by the mapping table.
//!
//! Each collaborator is a trait so callers can swap in their own lookups; the
//! `Standard*` types are the implementations built from configuration. All of
//! them are stateless after construction and safe to share across threads.

use crate::config::Config;
use crate::error::AccessError;
use chrono::{Local, NaiveDate};
use fhir_model::{Address, HumanName, Patient, Reference};
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

pub mod address;
pub mod geo;
pub mod human_name;
pub mod identifier;
pub mod organization;
mod primary;

pub use address::StandardAddressUtils;
pub use geo::{Location, StandardGeoUtils, GEO_LOCATION_URI};
pub use human_name::StandardHumanNameUtils;
pub use identifier::StandardIdentifierUtils;
pub use organization::DirectoryOrganizationUtils;

/// Resolves a managing-organization reference to an organization unit id.
pub trait OrganizationUtils: Send + Sync + Debug {
    fn organization_unit_id(
        &self,
        reference: Option<&Reference>,
        code_system: &str,
    ) -> Result<String, AccessError>;
}

pub trait IdentifierUtils: Send + Sync + Debug {
    /// Value of the patient identifier issued by `system`.
    fn identifier(&self, patient: &Patient, system: &str) -> Result<String, AccessError>;
}

pub trait HumanNameUtils: Send + Sync + Debug {
    /// Never fails; an empty sequence yields an empty name.
    fn primary_name<'a>(&self, names: &'a [HumanName]) -> Cow<'a, HumanName>;

    /// All given names as one string, empty when there are none.
    fn single_given(&self, name: &HumanName) -> String;

    fn first_given(&self, name: &HumanName) -> Option<String> {
        name.given.iter().find(|g| !g.trim().is_empty()).cloned()
    }

    fn second_given(&self, name: &HumanName) -> Option<String> {
        name.given.iter().filter(|g| !g.trim().is_empty()).nth(1).cloned()
    }
}

pub trait AddressUtils: Send + Sync + Debug {
    /// Never fails; an empty sequence yields an empty address.
    fn primary_address<'a>(&self, addresses: &'a [Address]) -> Cow<'a, Address>;

    /// Address lines as one string, empty when there are none.
    fn single_line(&self, address: &Address) -> String;

    /// Lines, postal code and city, then state; the free text when all are blank.
    fn constructed_text(&self, address: &Address) -> Option<String>;
}

pub trait GeoUtils: Send + Sync + Debug {
    /// `Ok(None)` when the address carries no location.
    fn location(&self, address: &Address) -> Result<Option<Location>, AccessError>;
}

fn reference_date(config: &Config) -> NaiveDate {
    config
        .mapping
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Code systems the mapping table resolves identifiers under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSystems {
    pub organization: String,
    pub identifier: String,
}

/// The collaborators one mapping invocation reads through.
#[derive(Debug, Clone)]
pub struct AccessorSet {
    pub organizations: Arc<dyn OrganizationUtils>,
    pub identifiers: Arc<dyn IdentifierUtils>,
    pub names: Arc<dyn HumanNameUtils>,
    pub addresses: Arc<dyn AddressUtils>,
    pub geo: Arc<dyn GeoUtils>,
    pub systems: CodeSystems,
}

impl AccessorSet {
    /// Standard accessors configured from `config`.
    ///
    /// Without a configured reference date, periods are checked against the
    /// local date at construction time.
    pub fn from_config(config: &Config) -> Self {
        let mapping = &config.mapping;
        let reference_date = reference_date(config);

        Self {
            organizations: Arc::new(DirectoryOrganizationUtils::new(
                mapping.organization_code_prefix.clone(),
                config.organization_units.clone(),
            )),
            identifiers: Arc::new(StandardIdentifierUtils),
            names: Arc::new(StandardHumanNameUtils::new(
                mapping.given_delimiter.clone(),
                reference_date,
            )),
            addresses: Arc::new(StandardAddressUtils::new(
                mapping.line_delimiter.clone(),
                reference_date,
            )),
            geo: Arc::new(StandardGeoUtils),
            systems: CodeSystems {
                organization: mapping.organization_system.clone(),
                identifier: mapping.identifier_system.clone(),
            },
        }
    }

    pub fn with_organizations(mut self, organizations: Arc<dyn OrganizationUtils>) -> Self {
        self.organizations = organizations;
        self
    }

    pub fn with_identifiers(mut self, identifiers: Arc<dyn IdentifierUtils>) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn with_geo(mut self, geo: Arc<dyn GeoUtils>) -> Self {
        self.geo = geo;
        self
    }
}
