use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Marker accepted in `mistingDays` for plants that should not be misted.
pub const NO_MISTING: &str = "no-misting";
/// Marker accepted in `repotMonths` for plants that are never repotted.
pub const NO_REPOT: &str = "no-repot";

/// A care interval. Replaces the numeric-or-sentinel fields of the raw dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    Every(u32),
    NotApplicable,
    #[default]
    Unspecified,
}

impl Interval {
    pub fn every(&self) -> Option<u32> {
        match self {
            Interval::Every(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Interval::NotApplicable)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Number(u32),
    Marker(String),
}

pub(crate) fn deserialize_misting<'de, D>(deserializer: D) -> Result<Interval, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with_marker(deserializer, NO_MISTING)
}

pub(crate) fn deserialize_repotting<'de, D>(deserializer: D) -> Result<Interval, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with_marker(deserializer, NO_REPOT)
}

/// `null` and `0` are unspecified; only the field's own marker, matched exactly, means not applicable.
fn deserialize_with_marker<'de, D>(deserializer: D, marker: &str) -> Result<Interval, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawInterval>::deserialize(deserializer)? {
        None | Some(RawInterval::Number(0)) => Ok(Interval::Unspecified),
        Some(RawInterval::Number(n)) => Ok(Interval::Every(n)),
        Some(RawInterval::Marker(value)) if value == marker => Ok(Interval::NotApplicable),
        Some(RawInterval::Marker(value)) => Err(D::Error::custom(format!(
            "unknown interval marker {value:?}, expected a number, null or {marker:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_misting")]
        misting: Interval,
        #[serde(default, deserialize_with = "deserialize_repotting")]
        repotting: Interval,
    }

    fn parse(json: &str) -> Result<Holder, serde_json::Error> {
        serde_json::from_str::<Holder>(json)
    }

    #[test]
    fn numbers_become_every() {
        let holder = parse(r#"{"misting": 14, "repotting": 24}"#).unwrap();
        assert_eq!(holder.misting, Interval::Every(14));
        assert_eq!(holder.repotting, Interval::Every(24));
    }

    #[test]
    fn null_zero_and_absent_are_unspecified() {
        let holder = parse(r#"{"misting": null, "repotting": 0}"#).unwrap();
        assert_eq!(holder.misting, Interval::Unspecified);
        assert_eq!(holder.repotting, Interval::Unspecified);
        let holder = parse("{}").unwrap();
        assert_eq!(holder.misting, Interval::Unspecified);
        assert_eq!(holder.repotting, Interval::Unspecified);
    }

    #[test]
    fn each_field_accepts_its_own_marker() {
        let holder = parse(r#"{"misting": "no-misting", "repotting": "no-repot"}"#).unwrap();
        assert_eq!(holder.misting, Interval::NotApplicable);
        assert_eq!(holder.repotting, Interval::NotApplicable);
    }

    #[test]
    fn markers_are_not_interchangeable() {
        let err = parse(r#"{"misting": "no-repot"}"#).unwrap_err();
        assert!(err.to_string().contains("no-repot"));
        assert!(parse(r#"{"repotting": "no-misting"}"#).is_err());
    }

    #[test]
    fn markers_match_exactly() {
        assert!(parse(r#"{"misting": "No-Misting"}"#).is_err());
        assert!(parse(r#"{"repotting": " no-repot"}"#).is_err());
    }

    #[test]
    fn unknown_marker_is_rejected() {
        let err = parse(r#"{"misting": "sometimes"}"#).unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }
}
