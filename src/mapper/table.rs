//! The output schema and the mapping table evaluated against it.

use crate::accessors::{AccessorSet, Location};
use crate::error::AccessError;
use fhir_model::Patient;
use serde::{Serialize, Serializer};
use std::fmt;

/// Every field an output record can hold.
///
/// Declaration order is the order fields appear in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetField {
    OrganizationUnitId,
    NationalIdentifier,
    LastName,
    FirstName,
    BirthDate,
    Gender,
    Street,
    City,
    StateOfCountry,
    Country,
    Coordinates,
}

impl TargetField {
    pub const ALL: [TargetField; 11] = [
        TargetField::OrganizationUnitId,
        TargetField::NationalIdentifier,
        TargetField::LastName,
        TargetField::FirstName,
        TargetField::BirthDate,
        TargetField::Gender,
        TargetField::Street,
        TargetField::City,
        TargetField::StateOfCountry,
        TargetField::Country,
        TargetField::Coordinates,
    ];

    /// The literal name downstream consumers key on.
    pub const fn name(self) -> &'static str {
        match self {
            TargetField::OrganizationUnitId => "organizationUnitId",
            TargetField::NationalIdentifier => "National identifier",
            TargetField::LastName => "Last name",
            TargetField::FirstName => "First name",
            TargetField::BirthDate => "Birth date",
            TargetField::Gender => "Gender",
            TargetField::Street => "Street",
            TargetField::City => "City",
            TargetField::StateOfCountry => "State of country",
            TargetField::Country => "Country",
            TargetField::Coordinates => "coordinates",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Attribute fields live in the record's attribute map; the others are slots.
    pub const fn is_attribute(self) -> bool {
        !matches!(
            self,
            TargetField::OrganizationUnitId | TargetField::Coordinates
        )
    }

    pub const fn is_location(self) -> bool {
        matches!(self, TargetField::Coordinates)
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TargetField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub type TextFn = fn(&Patient, &AccessorSet) -> Result<Option<String>, AccessError>;
pub type LocationFn = fn(&Patient, &AccessorSet) -> Result<Option<Location>, AccessError>;

#[derive(Clone, Copy)]
pub enum Extractor {
    Text(TextFn),
    Location(LocationFn),
}

/// One row of the mapping table.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: TargetField,
    pub extract: Extractor,
}

impl FieldRule {
    pub const fn text(field: TargetField, f: TextFn) -> Self {
        Self {
            field,
            extract: Extractor::Text(f),
        }
    }

    pub const fn location(field: TargetField, f: LocationFn) -> Self {
        Self {
            field,
            extract: Extractor::Location(f),
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.extract {
            Extractor::Text(_) => "text",
            Extractor::Location(_) => "location",
        };
        f.debug_struct("FieldRule")
            .field("field", &self.field.name())
            .field("extract", &kind)
            .finish()
    }
}

pub const STANDARD_RULES: &[FieldRule] = &[
    FieldRule::text(TargetField::OrganizationUnitId, organization_unit_id),
    FieldRule::text(TargetField::NationalIdentifier, national_identifier),
    FieldRule::text(TargetField::LastName, last_name),
    FieldRule::text(TargetField::FirstName, first_name),
    FieldRule::text(TargetField::BirthDate, birth_date),
    FieldRule::text(TargetField::Gender, gender),
    FieldRule::text(TargetField::Street, street),
    FieldRule::text(TargetField::City, city),
    FieldRule::text(TargetField::StateOfCountry, state_of_country),
    FieldRule::text(TargetField::Country, country),
    FieldRule::location(TargetField::Coordinates, coordinates),
];

/// Empty renderings are written as null.
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn organization_unit_id(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    a.organizations
        .organization_unit_id(p.managing_organization.as_ref(), &a.systems.organization)
        .map(Some)
}

fn national_identifier(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    a.identifiers.identifier(p, &a.systems.identifier).map(Some)
}

fn last_name(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    Ok(a.names.primary_name(&p.name).family.clone().and_then(non_empty))
}

fn first_name(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    let name = a.names.primary_name(&p.name);
    Ok(non_empty(a.names.single_given(&name)))
}

fn birth_date(p: &Patient, _: &AccessorSet) -> Result<Option<String>, AccessError> {
    Ok(p.birth_date.clone())
}

fn gender(p: &Patient, _: &AccessorSet) -> Result<Option<String>, AccessError> {
    Ok(p.gender.clone())
}

fn street(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    let address = a.addresses.primary_address(&p.address);
    Ok(non_empty(a.addresses.single_line(&address)))
}

fn city(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    Ok(a.addresses.primary_address(&p.address).city.clone())
}

fn state_of_country(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    Ok(a.addresses.primary_address(&p.address).state.clone())
}

fn country(p: &Patient, a: &AccessorSet) -> Result<Option<String>, AccessError> {
    Ok(a.addresses.primary_address(&p.address).country.clone())
}

fn coordinates(p: &Patient, a: &AccessorSet) -> Result<Option<Location>, AccessError> {
    let address = a.addresses.primary_address(&p.address);
    a.geo.location(&address)
}
