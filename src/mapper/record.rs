use crate::accessors::Location;
use crate::mapper::table::TargetField;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Location(Option<Location>),
}

/// The flat result of one mapping invocation.
///
/// Serializes as `{"organizationUnitId": …, "coordinates": …, "attributes": {…}}`
/// with attributes in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRecord {
    values: BTreeMap<TargetField, FieldValue>,
}

impl OutputRecord {
    pub(crate) fn set(&mut self, field: TargetField, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: TargetField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn organization_unit_id(&self) -> Option<&str> {
        self.text(TargetField::OrganizationUnitId)
    }

    pub fn coordinates(&self) -> Option<Location> {
        match self.values.get(&TargetField::Coordinates) {
            Some(FieldValue::Location(location)) => *location,
            _ => None,
        }
    }

    /// Text value of a field, `None` when null or not a text field.
    pub fn text(&self, field: TargetField) -> Option<&str> {
        match self.values.get(&field) {
            Some(FieldValue::Text(value)) => value.as_deref(),
            _ => None,
        }
    }

    /// Text value of an attribute by its literal name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        TargetField::from_name(name)
            .filter(|f| f.is_attribute())
            .and_then(|f| self.text(f))
    }

    /// Attribute fields and their values in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = (TargetField, Option<&str>)> + '_ {
        self.values
            .iter()
            .filter(|(field, _)| field.is_attribute())
            .map(|(field, value)| match value {
                FieldValue::Text(text) => (*field, text.as_deref()),
                FieldValue::Location(_) => (*field, None),
            })
    }
}

struct Attributes<'a>(&'a OutputRecord);

impl Serialize for Attributes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.0.attributes() {
            map.serialize_entry(&field, &value)?;
        }
        map.end()
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(
            TargetField::OrganizationUnitId.name(),
            &self.organization_unit_id(),
        )?;
        map.serialize_entry(TargetField::Coordinates.name(), &self.coordinates())?;
        map.serialize_entry("attributes", &Attributes(self))?;
        map.end()
    }
}
