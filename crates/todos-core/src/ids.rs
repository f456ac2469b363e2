use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Path sentinel naming the synthetic starter list.
pub const STARTER_LIST_ID: &str = "welcome";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid id: {0:?}")]
pub struct ParseIdError(pub String);

macro_rules! surrogate_id {
    ($name:ident) => {
        /// Integer surrogate key assigned by the store.
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| ParseIdError(s.to_owned()))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

surrogate_id!(TodoListId);
surrogate_id!(TodoId);

/// Identity of a list as it appears in a request path: either a stored
/// row or the synthetic starter list.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ListId {
    Persisted(TodoListId),
    Starter,
}

impl ListId {
    pub fn is_starter(&self) -> bool {
        matches!(self, Self::Starter)
    }

    pub fn persisted(&self) -> Option<TodoListId> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Starter => None,
        }
    }
}

impl From<TodoListId> for ListId {
    fn from(id: TodoListId) -> Self {
        Self::Persisted(id)
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Starter => f.write_str(STARTER_LIST_ID),
        }
    }
}

impl FromStr for ListId {
    type Err = ParseIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == STARTER_LIST_ID {
            return Ok(Self::Starter);
        }
        s.parse().map(Self::Persisted)
    }
}

// Persisted ids go over the wire as numbers, the starter list as its sentinel string.
impl Serialize for ListId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Persisted(id) => serializer.serialize_i64(id.get()),
            Self::Starter => serializer.serialize_str(STARTER_LIST_ID),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawListId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ListId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawListId::deserialize(deserializer)? {
            RawListId::Number(n) => Ok(Self::Persisted(TodoListId::new(n))),
            RawListId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_parses_as_starter() {
        let id: ListId = "welcome".parse().unwrap();
        assert!(id.is_starter());
        assert_eq!(id.persisted(), None);
    }

    #[test]
    fn numeric_parses_as_persisted() {
        let id: ListId = "42".parse().unwrap();
        assert_eq!(id, ListId::Persisted(TodoListId::new(42)));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = "groceries".parse::<ListId>().unwrap_err();
        assert_eq!(err, ParseIdError("groceries".into()));
        assert!("".parse::<TodoId>().is_err());
        assert!("1.5".parse::<TodoId>().is_err());
    }

    #[test]
    fn starter_sentinel_is_case_sensitive() {
        assert!("Welcome".parse::<ListId>().is_err());
    }

    #[test]
    fn display_matches_path_form() {
        assert_eq!(ListId::Starter.to_string(), "welcome");
        assert_eq!(ListId::from(TodoListId::new(7)).to_string(), "7");
    }

    #[test]
    fn list_id_wire_format() {
        assert_eq!(serde_json::to_value(ListId::Starter).unwrap(), "welcome");
        assert_eq!(
            serde_json::to_value(ListId::Persisted(TodoListId::new(3))).unwrap(),
            3
        );
    }

    #[test]
    fn list_id_accepts_number_or_string() {
        let a: ListId = serde_json::from_str("5").unwrap();
        let b: ListId = serde_json::from_str("\"5\"").unwrap();
        let c: ListId = serde_json::from_str("\"welcome\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(c, ListId::Starter);
        assert!(serde_json::from_str::<ListId>("\"nope\"").is_err());
    }

    #[test]
    fn todo_id_is_transparent() {
        let json = serde_json::to_string(&TodoId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
