use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "log_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogType {
    Nursing,
    Bottle,
    Pump,
    Diaper,
}

/// Only meaningful for some [`LogType`]s; the pairing is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "log_sub_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogSubType {
    Wet,
    Dirty,
    Both,
    Formula,
    BreastMilk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "log_side", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Left,
    Right,
}

/// Client-submitted log fields, stored as-is. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LogItem {
    #[serde(default, rename = "type")]
    pub log_type: Option<LogType>,
    #[serde(default)]
    pub sub_type: Option<LogSubType>,
    #[serde(default)]
    pub amount_ml: Option<i32>,
    #[serde(default)]
    pub duration_seconds: Option<i32>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
impl LogItem {
    pub fn new(log_type: LogType) -> Self {
        Self {
            log_type: Some(log_type),
            ..Self::default()
        }
    }
}

/// Persisted activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub entry: LogItem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn decodes_wire_names() {
        let item: LogItem = serde_json::from_value(json!({
            "type": "BOTTLE",
            "sub_type": "BREAST_MILK",
            "amount_ml": 90,
            "created_at": "2024-05-01T08:30:00Z",
            "notes": "after nap"
        }))
        .unwrap();

        assert_eq!(item.log_type, Some(LogType::Bottle));
        assert_eq!(item.sub_type, Some(LogSubType::BreastMilk));
        assert_eq!(item.amount_ml, Some(90));
        assert_eq!(item.duration_seconds, None);
        assert_eq!(item.side, None);
        assert_eq!(item.created_at, Some(datetime!(2024-05-01 08:30:00 UTC)));
        assert_eq!(item.notes.as_deref(), Some("after nap"));
    }

    #[test]
    fn explicit_null_and_absent_both_decode_to_none() {
        let explicit: LogItem = serde_json::from_value(json!({
            "type": "NURSING",
            "side": null,
            "duration_seconds": null
        }))
        .unwrap();
        let absent: LogItem = serde_json::from_value(json!({ "type": "NURSING" })).unwrap();
        assert_eq!(explicit, absent);
    }

    #[test]
    fn rejects_unknown_enum_value() {
        let res: Result<LogItem, _> = serde_json::from_value(json!({ "type": "SLEEP" }));
        assert!(res.is_err());
    }

    #[test]
    fn type_may_be_omitted() {
        let item: LogItem = serde_json::from_value(json!({ "sub_type": "WET" })).unwrap();
        assert_eq!(item.log_type, None);
        assert_eq!(item.sub_type, Some(LogSubType::Wet));

        let v = serde_json::to_value(&item).unwrap();
        assert!(v["type"].is_null());
    }

    #[test]
    fn record_serializes_flat_snake_case() {
        let log = ActivityLog {
            id: Uuid::nil(),
            entry: LogItem {
                side: Some(Side::Left),
                duration_seconds: Some(600),
                ..LogItem::new(LogType::Nursing)
            },
        };
        let v = serde_json::to_value(&log).unwrap();
        assert_eq!(v["id"], Uuid::nil().to_string());
        assert_eq!(v["type"], "NURSING");
        assert_eq!(v["side"], "LEFT");
        assert_eq!(v["duration_seconds"], 600);
        assert!(v["sub_type"].is_null());
        assert!(v["created_at"].is_null());
        assert!(v.get("entry").is_none());
    }
}
