use crate::accessors::primary::select_primary;
use crate::accessors::AddressUtils;
use chrono::NaiveDate;
use fhir_model::{Address, AddressUse};
use std::borrow::Cow;

/// Address accessor flagging `use = home` as primary.
#[derive(Debug, Clone)]
pub struct StandardAddressUtils {
    line_delimiter: String,
    reference_date: NaiveDate,
}

impl StandardAddressUtils {
    pub fn new(line_delimiter: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            line_delimiter: line_delimiter.into(),
            reference_date,
        }
    }
}

fn not_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl AddressUtils for StandardAddressUtils {
    fn primary_address<'a>(&self, addresses: &'a [Address]) -> Cow<'a, Address> {
        select_primary(
            addresses,
            self.reference_date,
            |a| a.period.as_ref(),
            |a| a.use_ == Some(AddressUse::Home),
        )
        .map(Cow::Borrowed)
        .unwrap_or_else(|| Cow::Owned(Address::default()))
    }

    fn single_line(&self, address: &Address) -> String {
        address
            .line
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.line_delimiter)
    }

    fn constructed_text(&self, address: &Address) -> Option<String> {
        let mut parts: Vec<String> = address
            .line
            .iter()
            .filter(|l| !l.trim().is_empty())
            .cloned()
            .collect();

        match (not_blank(&address.postal_code), not_blank(&address.city)) {
            (Some(postal), Some(city)) => parts.push(format!("{} {}", postal, city)),
            (Some(postal), None) => parts.push(postal.to_string()),
            (None, Some(city)) => parts.push(city.to_string()),
            (None, None) => {}
        }
        if let Some(state) = not_blank(&address.state) {
            parts.push(state.to_string());
        }

        if parts.is_empty() {
            return address.text.clone();
        }
        Some(parts.join(&self.line_delimiter))
    }
}
