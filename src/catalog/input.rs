//! Request payloads accepted by the catalog, and their JSON field checks.
//!
//! Checks are presence/type only: names must be non-blank strings and years
//! must be JSON integers that fit in an `i32`.

use serde_json::Value;

use crate::error::CatalogError;
use crate::model::Movie;

/// Fields for a new movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub name: String,
    pub release_year: i32,
    pub actor_ids: Vec<String>,
}

impl NewMovie {
    /// Parse `{name, releaseYear, actorIds?}`.
    ///
    /// `actorIds` falls back to empty when absent or not an array; non-string
    /// entries are dropped.
    pub fn from_json(body: &Value) -> Result<Self, CatalogError> {
        let name = required_name(body)?;
        let release_year = required_year(body, "releaseYear")?;
        let actor_ids = match body.get("actorIds") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self {
            name,
            release_year,
            actor_ids,
        })
    }
}

/// Partial update for a movie. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub release_year: Option<i32>,
}

impl MoviePatch {
    /// Parse `{name?, releaseYear?}`. Unknown fields are ignored.
    pub fn from_json(body: &Value) -> Result<Self, CatalogError> {
        Ok(Self {
            name: optional_name(body)?,
            release_year: optional_year(body, "releaseYear")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.release_year.is_none()
    }
}

/// Fields for a new actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub name: String,
    pub birth_year: i32,
}

impl NewActor {
    /// Parse `{name, birthYear}`.
    pub fn from_json(body: &Value) -> Result<Self, CatalogError> {
        Ok(Self {
            name: required_name(body)?,
            birth_year: required_year(body, "birthYear")?,
        })
    }
}

/// Partial update for an actor. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub birth_year: Option<i32>,
}

impl ActorPatch {
    /// Parse `{name?, birthYear?}`. Unknown fields are ignored.
    pub fn from_json(body: &Value) -> Result<Self, CatalogError> {
        Ok(Self {
            name: optional_name(body)?,
            birth_year: optional_year(body, "birthYear")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.birth_year.is_none()
    }
}

/// Parse the `actorId` of an add-actor request.
pub fn actor_id_from_json(body: &Value) -> Result<String, CatalogError> {
    match body.get("actorId") {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.clone()),
        _ => Err(CatalogError::invalid("actorId must be a non-empty string")),
    }
}

/// Movie list filters, named after their query-string keys.
///
/// Both filters are AND-ed; an absent or empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    /// Case-insensitive substring of the movie name.
    pub name: Option<String>,
    /// Exact release year, compared as text.
    pub release_year: Option<String>,
}

impl MovieQuery {
    /// Build from query-string pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "nombre" => &mut query.name,
                "anioPublicacion" => &mut query.release_year,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        let name_ok = match non_empty(&self.name) {
            Some(needle) => movie
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        };
        let year_ok = match non_empty(&self.release_year) {
            Some(year) => movie.release_year.to_string() == year,
            None => true,
        };
        name_ok && year_ok
    }
}

fn non_empty(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|s| !s.is_empty())
}

pub(crate) fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::invalid("name must be a non-empty string"));
    }
    Ok(())
}

fn required_name(body: &Value) -> Result<String, CatalogError> {
    optional_name(body)?.ok_or_else(|| CatalogError::invalid("name is required"))
}

fn optional_name(body: &Value) -> Result<Option<String>, CatalogError> {
    match body.get("name") {
        None => Ok(None),
        Some(Value::String(name)) => {
            validate_name(name)?;
            Ok(Some(name.clone()))
        }
        Some(_) => Err(CatalogError::invalid("name must be a non-empty string")),
    }
}

fn required_year(body: &Value, field: &str) -> Result<i32, CatalogError> {
    optional_year(body, field)?
        .ok_or_else(|| CatalogError::invalid(format!("{field} is required")))
}

fn optional_year(body: &Value, field: &str) -> Result<Option<i32>, CatalogError> {
    match body.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .and_then(|year| i32::try_from(year).ok())
            .map(Some)
            .ok_or_else(|| CatalogError::invalid(format!("{field} must be an integer"))),
    }
}
