use crate::accessors::primary::select_primary;
use crate::accessors::HumanNameUtils;
use chrono::NaiveDate;
use fhir_model::{HumanName, NameUse};
use std::borrow::Cow;

/// Name accessor flagging `use = official` as primary.
#[derive(Debug, Clone)]
pub struct StandardHumanNameUtils {
    given_delimiter: String,
    reference_date: NaiveDate,
}

impl StandardHumanNameUtils {
    pub fn new(given_delimiter: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            given_delimiter: given_delimiter.into(),
            reference_date,
        }
    }
}

impl HumanNameUtils for StandardHumanNameUtils {
    fn primary_name<'a>(&self, names: &'a [HumanName]) -> Cow<'a, HumanName> {
        select_primary(
            names,
            self.reference_date,
            |n| n.period.as_ref(),
            |n| n.use_ == Some(NameUse::Official),
        )
        .map(Cow::Borrowed)
        .unwrap_or_else(|| Cow::Owned(HumanName::default()))
    }

    fn single_given(&self, name: &HumanName) -> String {
        name.given
            .iter()
            .filter(|g| !g.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.given_delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir_model::Period;

    fn utils() -> StandardHumanNameUtils {
        StandardHumanNameUtils::new(" ", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn name(family: &str, given: &[&str], use_: Option<NameUse>) -> HumanName {
        HumanName {
            use_,
            family: Some(family.to_string()),
            given: given.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_names_give_placeholder() {
        let primary = utils().primary_name(&[]);
        assert_eq!(*primary, HumanName::default());
        assert_eq!(utils().single_given(&primary), "");
    }

    #[test]
    fn test_single_name_is_primary_even_if_old() {
        let names = [name("Santos", &["Ana"], Some(NameUse::Old))];
        assert_eq!(utils().primary_name(&names).family.as_deref(), Some("Santos"));
    }

    #[test]
    fn test_official_name_preferred() {
        let names = [
            name("Reyes", &["Ana"], Some(NameUse::Usual)),
            name("Cruz", &["Maria"], Some(NameUse::Official)),
        ];
        assert_eq!(utils().primary_name(&names).family.as_deref(), Some("Cruz"));
    }

    #[test]
    fn test_ended_official_name_skipped() {
        let mut ended = name("Reyes", &["Ana"], Some(NameUse::Official));
        ended.period = Some(Period {
            start: None,
            end: Some("2010-12-31".into()),
        });
        let names = [ended, name("Cruz", &["Maria"], Some(NameUse::Maiden))];
        assert_eq!(utils().primary_name(&names).family.as_deref(), Some("Cruz"));
    }

    #[test]
    fn test_given_renderings() {
        let n = name("Cruz", &["Angelica", "Cecelia", "Kristin"], None);
        let u = utils();
        assert_eq!(u.single_given(&n), "Angelica Cecelia Kristin");
        assert_eq!(u.first_given(&n).as_deref(), Some("Angelica"));
        assert_eq!(u.second_given(&n).as_deref(), Some("Cecelia"));

        let dashed = StandardHumanNameUtils::new("-", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(dashed.single_given(&n), "Angelica-Cecelia-Kristin");
        assert_eq!(u.second_given(&name("Cruz", &["Maria"], None)), None);
    }

    #[test]
    fn test_blank_given_tokens_skipped() {
        let n = name("Cruz", &["", "Maria", "  ", "Luz"], None);
        let u = utils();
        assert_eq!(u.single_given(&n), "Maria Luz");
        assert_eq!(u.first_given(&n).as_deref(), Some("Maria"));
        assert_eq!(u.second_given(&n).as_deref(), Some("Luz"));
        assert_eq!(u.single_given(&name("Cruz", &[" "], None)), "");
    }
}
