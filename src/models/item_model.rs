use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Categories offered when creating an item. The server may return others.
pub const CATEGORIES: [&str; 5] = ["Assignment", "Exam", "Quiz", "Meeting", "Presentation"];

/// Server assigned identifier, kept opaque on the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => ItemId::Number(n),
            Err(_) => ItemId::Text(s.to_string()),
        }
    }
}

/// Urgency computed by the server from the due date.
///
/// Anything the client does not recognise, including `"NONE"`, is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "DUE_SOON")]
    DueSoon,
    #[serde(rename = "OVERDUE")]
    Overdue,
    #[serde(other, rename = "NONE")]
    None,
}

impl Default for Badge {
    fn default() -> Self {
        Badge::None
    }
}

impl Badge {
    /// Text shown in a card's badge region, if any
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Badge::DueSoon => Some("Due Soon"),
            Badge::Overdue => Some("OVERDUE!"),
            Badge::None => None,
        }
    }
}

/// The only status the client ever writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    pub due_date: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub badge: Option<Badge>,
}

impl Item {
    pub fn badge(&self) -> Badge {
        self.badge.unwrap_or_default()
    }

    /// Description, only when there is something to show
    pub fn visible_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod item_model_test {
    use super::{Badge, Item, ItemId};

    #[test]
    fn test_deserialize_item() {
        let json = r#"{"id":1,"userId":3,"title":"Pay rent","category":"finance",
            "dueDate":"2025-01-01T00:00:00Z","status":"Active","badge":"OVERDUE"}"#;

        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, ItemId::Number(1));
        assert_eq!(item.user_id, Some(3));
        assert_eq!(item.badge(), Badge::Overdue);
        assert_eq!(item.visible_description(), None);
    }

    #[test]
    fn test_badge_is_lenient() {
        let absent: Item =
            serde_json::from_str(r#"{"id":"a","title":"t","dueDate":"2025-01-01"}"#).unwrap();
        let null: Item = serde_json::from_str(
            r#"{"id":"a","title":"t","dueDate":"2025-01-01","badge":null}"#,
        )
        .unwrap();
        let unknown: Item = serde_json::from_str(
            r#"{"id":"a","title":"t","dueDate":"2025-01-01","badge":"SOMEDAY"}"#,
        )
        .unwrap();

        assert_eq!(absent.badge(), Badge::None);
        assert_eq!(null.badge(), Badge::None);
        assert_eq!(unknown.badge(), Badge::None);
        assert_eq!(absent.id, ItemId::Text("a".to_string()));
    }

    #[test]
    fn test_empty_description_is_hidden() {
        let item: Item = serde_json::from_str(
            r#"{"id":2,"title":"t","description":"","dueDate":"2025-01-01","badge":"DUE_SOON"}"#,
        )
        .unwrap();

        assert_eq!(item.visible_description(), None);
        assert_eq!(item.badge().label(), Some("Due Soon"));
    }

    #[test]
    fn test_item_id_from_str() {
        assert_eq!(ItemId::from("42"), ItemId::Number(42));
        assert_eq!(ItemId::from("abc").to_string(), "abc");
    }
}
