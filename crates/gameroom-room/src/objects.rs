//! Fixed objects a player can look at.

use serde::{Deserialize, Serialize};

/// One object in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomObject {
    pub name: String,
    /// What `/look <name>` says. Objects without a description are listed
    /// but can't be examined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RoomObject {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_owned),
        }
    }
}

/// The room's objects, in listing order.
///
/// Deserializes from a JSON array of `{"name": .., "description": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectTable {
    objects: Vec<RoomObject>,
}

impl ObjectTable {
    pub fn new(objects: Vec<RoomObject>) -> Self {
        Self { objects }
    }

    /// A table with no objects.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the description of the object called `name`, matched
    /// case-insensitively (full Unicode lower-casing) after trimming.
    pub fn describe(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_lowercase();
        self.objects
            .iter()
            .find(|o| o.name.to_lowercase() == name)
            .and_then(|o| o.description.as_deref())
    }

    /// The text sent in reply to a bare `/look`.
    pub fn listing(&self) -> String {
        if self.objects.is_empty() {
            return "There are no objects here.".to_owned();
        }
        let mut text = String::from("There are the following objects:");
        for object in &self.objects {
            text.push_str(" \n * ");
            text.push_str(&object.name);
        }
        text
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self::new(vec![
            RoomObject::new("Bread", Some("A bag of sliced bread.")),
            RoomObject::new("Knife", None),
            RoomObject::new("Jam", None),
            RoomObject::new("Robot", None),
            RoomObject::new("Papers", None),
        ])
    }
}
