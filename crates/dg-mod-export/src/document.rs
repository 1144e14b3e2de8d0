use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use dg_base::{ButtonConfig, DeckError};

/// Button entries keyed by path, kept in insertion order.
///
/// Exports insert in increasing cell index, so the serialized object reads
/// `/default/0, /default/1, ..., /default/10` rather than string order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonMap(Vec<(String, ButtonConfig)>);

impl ButtonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, button: ButtonConfig) {
        match self.get_mut(&key) {
            Some(existing) => *existing = button,
            None => self.0.push((key, button)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ButtonConfig> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, b)| b)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ButtonConfig> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, b)| b)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ButtonConfig)> {
        self.0.iter().map(|(k, b)| (k.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ButtonMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, button) in &self.0 {
            map.serialize_entry(key, button)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ButtonMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ButtonMapVisitor;

        impl<'de> Visitor<'de> for ButtonMapVisitor {
            type Value = ButtonMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of button paths to button entries")
            }

            // `"buttons": null` reads as an empty map
            fn visit_none<E: de::Error>(self) -> Result<ButtonMap, E> {
                Ok(ButtonMap::new())
            }

            fn visit_unit<E: de::Error>(self) -> Result<ButtonMap, E> {
                Ok(ButtonMap::new())
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ButtonMap, D::Error> {
                deserializer.deserialize_map(self)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ButtonMap, A::Error> {
                let mut buttons = ButtonMap::new();
                while let Some((key, button)) = access.next_entry::<String, ButtonConfig>()? {
                    buttons.insert(key, button);
                }
                Ok(buttons)
            }
        }

        deserializer.deserialize_option(ButtonMapVisitor)
    }
}

/// The exported artifact: `{ "buttons": { "<path>": { command, args, icon } } }`.
///
/// Other top-level fields found in a document on disk (a `status` button,
/// for instance) are carried through untouched when it is rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub buttons: ButtonMap,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConfigDocument {
    /// Pretty-printed JSON, two-space indent.
    pub fn to_json_pretty(&self) -> Result<String, DeckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), DeckError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| DeckError::io(path.display().to_string(), e))
    }

    pub fn read_from(path: &Path) -> Result<Self, DeckError> {
        let content = fs::read_to_string(path).map_err(|e| DeckError::io(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn button(command: &str) -> ButtonConfig {
        ButtonConfig { command: Some(command.into()), args: None, icon: None }
    }

    #[test]
    fn keys_serialize_in_insertion_order() {
        let mut doc = ConfigDocument::default();
        for idx in [0, 2, 10, 11] {
            doc.buttons.insert(format!("/default/{}", idx), button("x"));
        }
        let json = doc.to_json_pretty().unwrap();
        let positions: Vec<usize> =
            ["/default/0", "/default/2", "/default/10", "/default/11"].iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "keys out of order:\n{}", json);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = ButtonMap::new();
        map.insert("/a".into(), button("one"));
        map.insert("/b".into(), button("two"));
        map.insert("/a".into(), button("three"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["/a", "/b"]);
        assert_eq!(map.get("/a").unwrap().command.as_deref(), Some("three"));
    }

    #[test]
    fn empty_document_shape() {
        let doc = ConfigDocument::default();
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "buttons": {} }));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip_through_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        let original = json!({
            "buttons": { "/default/1": { "command": "ls", "args": null, "icon": null } },
            "status": { "command": "date", "args": null, "icon": null }
        });
        fs::write(&path, original.to_string()).unwrap();

        let doc = ConfigDocument::read_from(&path).unwrap();
        assert_eq!(doc.buttons.len(), 1);
        doc.write_to(&path).unwrap();

        let rewritten: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rewritten, original);
    }

    #[test]
    fn missing_buttons_defaults_to_empty() {
        let doc: ConfigDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.buttons.is_empty());
    }

    #[test]
    fn null_buttons_reads_as_empty() {
        let doc: ConfigDocument = serde_json::from_str(r#"{"buttons": null, "status": null}"#).unwrap();
        assert!(doc.buttons.is_empty());
        assert_eq!(doc.extra.get("status"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn read_missing_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");
        let err = ConfigDocument::read_from(&path).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
