//! Window identities.
//!
//! Every native window is addressed by a `(uuid, name)` pair.  The uuid names
//! the owning application, the name the window within it.  Identities are
//! plain values: they are cloned freely and used as the join key between
//! tabs, tab groups and workspace snapshots.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Uniquely identifies one native window.
///
/// Ordering is by `uuid`, then `name`, which gives the stable sort used
/// wherever iteration order must be deterministic.
///
/// On the wire it is either `{"uuid": .., "name": ..}` or the string form
/// `"uuid/name"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WindowIdentity {
    pub uuid: String,
    pub name: String,
}

impl WindowIdentity {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }

    /// Single-string form of the identity (`uuid/name`).
    pub fn id(&self) -> String {
        format!("{}/{}", self.uuid, self.name)
    }

    /// Exact match on both halves of the identity.
    pub fn matches(&self, other: &WindowIdentity) -> bool {
        self.uuid == other.uuid && self.name == other.name
    }
}

impl fmt::Display for WindowIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.uuid, self.name)
    }
}

impl<'de> Deserialize<'de> for WindowIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = WindowIdentity;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "object {{uuid, name}} or string \"uuid/name\"")
            }
            fn visit_map<A>(self, mut map: A) -> Result<WindowIdentity, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut uuid = None;
                let mut name = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "uuid" => uuid = Some(map.next_value()?),
                        "name" => name = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                Ok(WindowIdentity {
                    uuid: uuid.ok_or_else(|| DeError::missing_field("uuid"))?,
                    name: name.ok_or_else(|| DeError::missing_field("name"))?,
                })
            }
            fn visit_str<E>(self, s: &str) -> Result<WindowIdentity, E>
            where
                E: DeError,
            {
                match s.trim().split_once('/') {
                    Some((uuid, name)) if !uuid.is_empty() && !name.is_empty() => {
                        Ok(WindowIdentity::new(uuid, name))
                    }
                    _ => Err(DeError::custom(format!(
                        "window identity: expected \"uuid/name\", got {:?}",
                        s
                    ))),
                }
            }
        }
        deserializer.deserialize_any(V)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_requires_both_halves() {
        let a = WindowIdentity::new("app", "main");
        assert!(a.matches(&WindowIdentity::new("app", "main")));
        assert!(!a.matches(&WindowIdentity::new("app", "app")));
        assert!(!a.matches(&WindowIdentity::new("main", "main")));
    }

    #[test]
    fn ordering_is_uuid_then_name() {
        let mut ids = vec![
            WindowIdentity::new("b", "a"),
            WindowIdentity::new("a", "z"),
            WindowIdentity::new("a", "b"),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                WindowIdentity::new("a", "b"),
                WindowIdentity::new("a", "z"),
                WindowIdentity::new("b", "a"),
            ]
        );
    }

    #[test]
    fn id_and_display_agree() {
        let w = WindowIdentity::new("app-1", "child-window-1");
        assert_eq!(w.id(), "app-1/child-window-1");
        assert_eq!(w.to_string(), w.id());
    }

    #[test]
    fn deserializes_from_snapshot_shape() {
        let w: WindowIdentity =
            serde_json::from_str(r#"{"uuid":"app-1","name":"main-window"}"#).unwrap();
        assert_eq!(w, WindowIdentity::new("app-1", "main-window"));
    }

    #[test]
    fn deserializes_from_string_form() {
        let w: WindowIdentity = serde_json::from_str(r#""app-1/main-window""#).unwrap();
        assert_eq!(w, WindowIdentity::new("app-1", "main-window"));
        assert!(serde_json::from_str::<WindowIdentity>(r#""no-slash""#).is_err());
        assert!(serde_json::from_str::<WindowIdentity>(r#""/name""#).is_err());
    }

    #[test]
    fn missing_half_is_an_error() {
        assert!(serde_json::from_str::<WindowIdentity>(r#"{"uuid":"app-1"}"#).is_err());
    }
}
