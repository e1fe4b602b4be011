//! The persisted install record

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Legacy key holding a single remote base, folded into the endpoint list
pub const LEGACY_REMOTE_KEY: &str = "github";

/// Suffix the legacy remote base needs to reach package files
pub const LEGACY_REMOTE_SUFFIX: &str = "/packages";

/// Installation state shared by every operation
///
/// Field names follow the on-disk `config.json` layout. Keys this type does
/// not know about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstallState {
    /// Source endpoints, most preferred first
    #[serde(
        rename = "registry",
        alias = "sourceEndpoints",
        default,
        deserialize_with = "one_or_many",
        serialize_with = "ser_one_or_many"
    )]
    pub endpoints: Vec<String>,

    /// Packages confirmed fully installed, in insertion order
    #[serde(
        rename = "spliced",
        alias = "installedPackages",
        default,
        deserialize_with = "dedup_names"
    )]
    pub spliced: Vec<String>,

    #[serde(
        alias = "installedAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub installed_at: Option<DateTime<Utc>>,

    #[serde(
        alias = "updatedAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Suite version recorded by the last bulk install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omega_version: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InstallState {
    /// Fresh state using the given endpoints
    #[must_use]
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.spliced.iter().any(|n| n == name)
    }

    /// Record a package as installed; returns true if it was not already present
    pub fn mark_installed(&mut self, name: &str) -> bool {
        if self.is_installed(name) {
            return false;
        }
        self.spliced.push(name.to_string());
        true
    }

    /// Remove a package record; returns true if it was present
    pub fn unmark_installed(&mut self, name: &str) -> bool {
        let before = self.spliced.len();
        self.spliced.retain(|n| n != name);
        before != self.spliced.len()
    }

    #[must_use]
    pub fn installed_count(&self) -> usize {
        self.spliced.len()
    }

    /// Stamp the start of a bulk install
    pub fn stamp_suite(&mut self, version: Option<&str>, at: DateTime<Utc>) {
        self.installed_at = Some(at);
        if let Some(version) = version {
            self.omega_version = Some(version.to_string());
        }
    }

    /// Fill in missing endpoints and fold the legacy remote key in as a fallback
    pub(crate) fn normalize(&mut self, default_endpoints: &[String]) {
        if self.endpoints.is_empty() {
            self.endpoints = default_endpoints.to_vec();
        }

        if let Some(Value::String(remote)) = self.extra.get(LEGACY_REMOTE_KEY) {
            let trimmed = remote.trim_end_matches('/');
            if !trimmed.is_empty() {
                let folded = if trimmed.ends_with(LEGACY_REMOTE_SUFFIX) {
                    trimmed.to_string()
                } else {
                    format!("{trimmed}{LEGACY_REMOTE_SUFFIX}")
                };
                if !self
                    .endpoints
                    .iter()
                    .any(|e| e.trim_end_matches('/') == folded)
                {
                    self.endpoints.push(folded);
                }
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    let list = match value {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    };
    Ok(dedup(list.into_iter().filter(|s| !s.trim().is_empty())))
}

#[allow(clippy::ptr_arg)]
fn ser_one_or_many<S>(endpoints: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match endpoints.as_slice() {
        [single] => serializer.serialize_str(single),
        many => many.serialize(serializer),
    }
}

fn dedup_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(dedup(names.unwrap_or_default().into_iter()))
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Timestamps are advisory; anything unreadable becomes `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

/// Parse RFC 3339, or a zone-less ISO-8601 timestamp taken as UTC
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2025-01-02T03:04:05Z").is_some());
        assert!(parse_timestamp("2025-01-02T03:04:05.123456").is_some());
        assert!(parse_timestamp("2025-01-02 03:04:05").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut state = InstallState::new(vec!["http://a".into()]);
        assert!(state.mark_installed("aura"));
        assert!(!state.mark_installed("aura"));
        assert_eq!(state.installed_count(), 1);
        assert!(state.unmark_installed("aura"));
        assert!(!state.is_installed("aura"));
    }

    #[test]
    fn test_single_endpoint_serializes_as_string() {
        let state = InstallState::new(vec!["http://a".into()]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["registry"], "http://a");

        let state = InstallState::new(vec!["http://a".into(), "/b".into()]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["registry"][1], "/b");
    }

    #[test]
    fn test_legacy_remote_folded_once() {
        let mut state: InstallState = serde_json::from_str(
            r#"{"registry": "http://local:8000", "github": "https://raw.example.com/main"}"#,
        )
        .unwrap();
        state.normalize(&[]);
        state.normalize(&[]);
        assert_eq!(
            state.endpoints,
            vec![
                "http://local:8000".to_string(),
                "https://raw.example.com/main/packages".to_string()
            ]
        );
    }
}
