use chrono::{Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// [NameUse](<https://hl7.org/fhir/R4/valueset-name-use.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    Usual,
    Official,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
}

/// [AddressUse](<https://hl7.org/fhir/R4/valueset-address-use.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    Home,
    Work,
    Temp,
    Old,
    Billing,
}

/// [AddressType](<https://hl7.org/fhir/R4/valueset-address-type.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Postal,
    Physical,
    Both,
}

/// [IdentifierUse](<https://hl7.org/fhir/R4/valueset-identifier-use.html>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

/// [Period](<https://hl7.org/fhir/R4/datatypes.html#Period>)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Period {
    /// Returns false only when a parseable bound excludes `date`.
    ///
    /// Partial dates widen to the whole year or month they name, so an `end`
    /// of `2019` still covers 2019-12-31. Only the date part of a dateTime is
    /// compared.
    pub fn covers(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start.as_deref().and_then(|s| parse_bound(s, false)) {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end.as_deref().and_then(|s| parse_bound(s, true)) {
            if date > end {
                return false;
            }
        }
        true
    }
}

fn parse_bound(value: &str, upper: bool) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    let mut parts = date_part.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month = match parts.next() {
        Some(m) => Some(m.parse::<u32>().ok()?),
        None => None,
    };
    let day = match parts.next() {
        Some(d) => Some(d.parse::<u32>().ok()?),
        None => None,
    };

    match (month, day) {
        (Some(m), Some(d)) => NaiveDate::from_ymd_opt(year, m, d),
        (Some(m), None) => {
            let first = NaiveDate::from_ymd_opt(year, m, 1)?;
            if upper {
                first.checked_add_months(Months::new(1))?.pred_opt()
            } else {
                Some(first)
            }
        }
        (None, _) if upper => NaiveDate::from_ymd_opt(year, 12, 31),
        (None, _) => NaiveDate::from_ymd_opt(year, 1, 1),
    }
}

/// [Extension](<https://hl7.org/fhir/R4/extensibility.html#Extension>)
///
/// Only the value types the mapper reads are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_decimal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Extension {
    /// First nested extension with the given url.
    pub fn child(&self, url: &str) -> Option<&Extension> {
        self.extension.iter().find(|e| e.url == url)
    }
}

/// Repeating primitive array with its `null` slots dropped.
///
/// A slot is `null` when only the `_given`/`_line` companion array carries
/// data for it, e.g. an extension without a value.
fn present_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

/// [HumanName](<https://hl7.org/fhir/R4/datatypes.html#HumanName>)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_: Option<NameUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub given: Vec<String>,
    #[serde(
        default,
        deserialize_with = "present_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub prefix: Vec<String>,
    #[serde(
        default,
        deserialize_with = "present_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suffix: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// [Address](<https://hl7.org/fhir/R4/datatypes.html#Address>)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_: Option<AddressUse>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<AddressType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub line: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Address {
    pub fn extension(&self, url: &str) -> Option<&Extension> {
        self.extension.iter().find(|e| e.url == url)
    }
}

/// [Identifier](<https://hl7.org/fhir/R4/datatypes.html#Identifier>)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_: Option<IdentifierUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    pub fn has_system(&self, system: &str) -> bool {
        self.system.as_deref() == Some(system)
    }
}

/// [Reference](<https://hl7.org/fhir/R4/references.html#Reference>)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    pub fn is_empty(&self) -> bool {
        self.reference.is_none() && self.identifier.is_none() && self.display.is_none()
    }

    /// Points at a resource contained in the referencing resource (`#id`).
    pub fn is_contained(&self) -> bool {
        self.reference
            .as_deref()
            .is_some_and(|r| r.starts_with('#'))
    }

    /// Resource type named by the reference.
    ///
    /// The type segment of a literal reference (`Organization/1`,
    /// `http://host/fhir/Organization/1/_history/2`) wins over the explicit
    /// `type` element, which only applies to logical and contained references.
    pub fn resource_type(&self) -> Option<&str> {
        self.literal_type().or(self.type_.as_deref())
    }

    fn literal_type(&self) -> Option<&str> {
        let literal = self.reference.as_deref()?;
        if literal.starts_with('#') {
            return None;
        }
        let literal = match literal.find("/_history/") {
            Some(idx) => &literal[..idx],
            None => literal,
        };
        literal.rsplit('/').nth(1).filter(|s| !s.is_empty())
    }
}
