//! Item record model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Display format for item timestamps, e.g. `05 Mar 2024, 02:07 PM`.
pub const TIMESTAMP_FORMAT: &str = "%d %b %Y, %I:%M %p";

/// Whether an item was reported lost or found.
///
/// Serialized as `"Lost"` / `"Found"`; any casing is accepted on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ItemStatus {
    Lost,
    Found,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lost => "Lost",
            Self::Found => "Found",
        }
    }

    /// Route path of the report form for this status.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Lost => "/lost",
            Self::Found => "/found",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lost" => Ok(Self::Lost),
            "found" => Ok(Self::Found),
            _ => Err(format!("Unknown item status: {}", s)),
        }
    }
}

impl TryFrom<String> for ItemStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single lost/found report as persisted in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub status: ItemStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact: String,
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
}

/// Raw fields of a report submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub location: String,
    pub contact: String,
}

impl Item {
    /// Build a record from a submission, stamped with the current local time.
    pub fn from_submission(
        status: ItemStatus,
        fields: NewItem,
        image_filename: Option<String>,
    ) -> Self {
        Self::from_submission_at(status, fields, image_filename, Local::now())
    }

    pub fn from_submission_at(
        status: ItemStatus,
        fields: NewItem,
        image_filename: Option<String>,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            status,
            name: fields.name,
            description: fields.description,
            location: fields.location,
            contact: fields.contact,
            image_filename,
            timestamp: format_timestamp(at),
        }
    }
}

/// Format a timestamp the way items display it.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

// Older data files store `null` for fields that were missing from the form.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields() -> NewItem {
        NewItem {
            name: "Blue umbrella".into(),
            description: "Folding, wooden handle".into(),
            location: "Library, 2nd floor".into(),
            contact: "sam@example.com".into(),
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("lost".parse::<ItemStatus>().unwrap(), ItemStatus::Lost);
        assert_eq!("FOUND".parse::<ItemStatus>().unwrap(), ItemStatus::Found);
        assert!("stolen".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap();
        assert_eq!(format_timestamp(at), "05 Mar 2024, 02:07 PM");

        let morning = Local.with_ymd_and_hms(2023, 12, 31, 0, 30, 0).unwrap();
        assert_eq!(format_timestamp(morning), "31 Dec 2023, 12:30 AM");
    }

    #[test]
    fn test_from_submission() {
        let at = Local.with_ymd_and_hms(2024, 1, 9, 9, 15, 0).unwrap();
        let item = Item::from_submission_at(ItemStatus::Found, fields(), None, at);

        assert_eq!(item.status, ItemStatus::Found);
        assert_eq!(item.name, "Blue umbrella");
        assert_eq!(item.location, "Library, 2nd floor");
        assert_eq!(item.image_filename, None);
        assert_eq!(item.timestamp, "09 Jan 2024, 09:15 AM");
    }

    #[test]
    fn test_serialized_shape() {
        let at = Local.with_ymd_and_hms(2024, 1, 9, 9, 15, 0).unwrap();
        let item = Item::from_submission_at(ItemStatus::Lost, fields(), None, at);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["status"], "Lost");
        assert_eq!(value["name"], "Blue umbrella");
        assert!(value["image_filename"].is_null());
    }

    #[test]
    fn test_status_loads_in_any_case() {
        let item: Item =
            serde_json::from_str(r#"{"status": "lost", "name": "Keys"}"#).unwrap();
        assert_eq!(item.status, ItemStatus::Lost);

        let item: Item = serde_json::from_str(r#"{"status": "FOUND"}"#).unwrap();
        assert_eq!(item.status, ItemStatus::Found);

        assert!(serde_json::from_str::<Item>(r#"{"status": "stolen"}"#).is_err());
        assert!(serde_json::from_str::<Item>(r#"{"name": "No status"}"#).is_err());
    }

    #[test]
    fn test_null_fields_load_as_empty() {
        let json = r#"{
            "status": "Found",
            "name": null,
            "description": "Black wallet",
            "location": null,
            "contact": null,
            "image_filename": null,
            "timestamp": "01 Feb 2024, 10:00 AM"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.description, "Black wallet");
        assert_eq!(item.contact, "");
        assert_eq!(item.image_filename, None);
    }
}
