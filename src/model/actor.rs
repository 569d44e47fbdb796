use serde::{Deserialize, Serialize};

use super::Document;

/// An actor in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
}

/// The `actores` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorDocument {
    #[serde(default)]
    pub actores: Vec<Actor>,
}

impl Document for ActorDocument {
    const NAME: &'static str = "actores";
}

impl ActorDocument {
    pub fn find(&self, id: &str) -> Option<&Actor> {
        self.actores.iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Actor> {
        self.actores.iter_mut().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Remove and return the actor with the given id.
    pub fn take(&mut self, id: &str) -> Option<Actor> {
        let index = self.actores.iter().position(|a| a.id == id)?;
        Some(self.actores.remove(index))
    }
}
