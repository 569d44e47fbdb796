use serde::{Deserialize, Serialize};

use super::Document;

/// A movie in the catalog.
///
/// `actor_ids` behaves as an ordered set: insertion order is kept and no id
/// appears twice. Entries are not required to resolve to an existing actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub name: String,
    pub release_year: i32,
    #[serde(default)]
    pub actor_ids: Vec<String>,
}

impl Movie {
    /// Add an actor id unless already present. Returns true if it was added.
    pub fn add_actor(&mut self, actor_id: &str) -> bool {
        if self.has_actor(actor_id) {
            return false;
        }
        self.actor_ids.push(actor_id.to_string());
        true
    }

    /// Remove an actor id. Returns true if it was present.
    pub fn remove_actor(&mut self, actor_id: &str) -> bool {
        let before = self.actor_ids.len();
        self.actor_ids.retain(|id| id != actor_id);
        self.actor_ids.len() != before
    }

    pub fn has_actor(&self, actor_id: &str) -> bool {
        self.actor_ids.iter().any(|id| id == actor_id)
    }

    /// Drop repeated actor ids, keeping the first occurrence of each.
    /// Returns true if anything was dropped.
    pub fn dedup_actors(&mut self) -> bool {
        let before = self.actor_ids.len();
        let mut seen = std::collections::HashSet::new();
        self.actor_ids.retain(|id| seen.insert(id.clone()));
        self.actor_ids.len() != before
    }
}

/// The `peliculas` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(default)]
    pub peliculas: Vec<Movie>,
}

impl Document for MovieDocument {
    const NAME: &'static str = "peliculas";
}

impl MovieDocument {
    pub fn find(&self, id: &str) -> Option<&Movie> {
        self.peliculas.iter().find(|m| m.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Movie> {
        self.peliculas.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Remove and return the movie with the given id.
    pub fn take(&mut self, id: &str) -> Option<Movie> {
        let index = self.peliculas.iter().position(|m| m.id == id)?;
        Some(self.peliculas.remove(index))
    }
}
