//! Branch Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Branch status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    #[default]
    Active,
    Inactive,
}

impl BranchStatus {
    pub const ALL: [BranchStatus; 2] = [BranchStatus::Active, BranchStatus::Inactive];

    /// Wire value (`active` / `inactive`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Display label with a leading capital
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!(
                "`{other}` is not a valid branch status (expected active or inactive)"
            )),
        }
    }
}

/// Branch entity (网点)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Store-assigned record key
    pub id: String,
    pub name: String,
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: BranchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create branch payload
///
/// Every field is optional on the wire; missing required fields are
/// reported by validation, not by JSON decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BranchStatus>,
}

impl BranchCreate {
    /// Names of required fields that are absent or blank, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("code", &self.code),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect()
    }
}

/// Update branch payload (all optional, present fields overwrite)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BranchStatus>,
}

impl BranchUpdate {
    /// True when no field would be overwritten
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&BranchStatus::Inactive).unwrap(),
            "\"inactive\""
        );
        let status: BranchStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, BranchStatus::Active);
        assert!(serde_json::from_str::<BranchStatus>("\"closed\"").is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("inactive".parse::<BranchStatus>(), Ok(BranchStatus::Inactive));
        assert!("Active".parse::<BranchStatus>().is_err());
        assert_eq!(BranchStatus::Active.label(), "Active");
        assert_eq!(BranchStatus::Active.toggled(), BranchStatus::Inactive);
    }

    #[test]
    fn test_missing_fields() {
        let payload: BranchCreate = serde_json::from_value(serde_json::json!({
            "name": "Main St",
            "code": "  ",
            "city": "Springfield"
        }))
        .unwrap();
        assert_eq!(payload.missing_fields(), vec!["code", "address", "state"]);
    }

    #[test]
    fn test_create_ignores_unknown_keys() {
        let payload: BranchCreate = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "createdAt": "2024-01-01T00:00:00Z",
            "name": "Main St"
        }))
        .unwrap();
        assert_eq!(payload.name.as_deref(), Some("Main St"));
    }

    #[test]
    fn test_branch_json_shape() {
        let now = Utc::now();
        let branch = Branch {
            id: "b1".into(),
            name: "Main St".into(),
            code: "MN01".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            phone: None,
            email: Some("main@example.com".into()),
            status: BranchStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&branch).unwrap();
        assert_eq!(value["status"], "active");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("phone").is_none());

        let back: Branch = serde_json::from_value(value).unwrap();
        assert_eq!(back, branch);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(BranchUpdate::default().is_empty());
        let update = BranchUpdate {
            city: Some("Shelbyville".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
