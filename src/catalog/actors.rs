use tracing::{info, warn};

use super::input::{validate_name, ActorPatch, NewActor};
use super::Catalog;
use crate::error::CatalogError;
use crate::id::{IdProvider, ACTOR_PREFIX};
use crate::model::{Actor, ActorDocument, Document, MovieDocument};
use crate::store::DocumentStore;

impl<S: DocumentStore, I: IdProvider> Catalog<S, I> {
    pub fn list_actors(&self) -> Result<Vec<Actor>, CatalogError> {
        let doc: ActorDocument = self.store.load()?;
        Ok(doc.actores)
    }

    pub fn get_actor(&self, id: &str) -> Result<Actor, CatalogError> {
        let doc: ActorDocument = self.store.load()?;
        doc.find(id)
            .cloned()
            .ok_or_else(|| CatalogError::actor_not_found(id))
    }

    pub fn create_actor(&self, input: NewActor) -> Result<Actor, CatalogError> {
        validate_name(&input.name)?;
        self.locks.with_lock(ActorDocument::NAME, || {
            let mut doc: ActorDocument = self.store.load()?;
            let id = self.fresh_id(ACTOR_PREFIX, |id| doc.contains(id))?;
            let actor = Actor {
                id,
                name: input.name,
                birth_year: input.birth_year,
            };
            doc.actores.push(actor.clone());
            self.store.save(&doc)?;
            info!(id = %actor.id, name = %actor.name, "actor created");
            Ok(actor)
        })
    }

    /// Apply the fields present in `patch`. An empty patch changes nothing.
    pub fn update_actor(&self, id: &str, patch: ActorPatch) -> Result<Actor, CatalogError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        self.locks.with_lock(ActorDocument::NAME, || {
            let mut doc: ActorDocument = self.store.load()?;
            let actor = doc
                .find_mut(id)
                .ok_or_else(|| CatalogError::actor_not_found(id))?;
            if patch.is_empty() {
                return Ok(actor.clone());
            }
            if let Some(name) = patch.name {
                actor.name = name;
            }
            if let Some(year) = patch.birth_year {
                actor.birth_year = year;
            }
            let updated = actor.clone();
            self.store.save(&doc)?;
            info!(%id, "actor updated");
            Ok(updated)
        })
    }

    /// Delete an actor and strip its id from every movie's cast.
    ///
    /// The actor document is saved before the movie document is touched, so
    /// a failure in the cascade leaves the deletion committed.
    pub fn delete_actor(&self, id: &str) -> Result<Actor, CatalogError> {
        let actor = self.locks.with_lock(ActorDocument::NAME, || {
            let mut doc: ActorDocument = self.store.load()?;
            let actor = doc.take(id).ok_or_else(|| CatalogError::actor_not_found(id))?;
            self.store.save(&doc)?;
            info!(%id, "actor deleted");
            Ok::<_, CatalogError>(actor)
        })?;

        self.locks
            .with_lock(MovieDocument::NAME, || {
                let mut doc: MovieDocument = self.store.load()?;
                let mut touched = 0usize;
                for movie in &mut doc.peliculas {
                    if movie.remove_actor(id) {
                        touched += 1;
                    }
                    movie.dedup_actors();
                }
                self.store.save(&doc)?;
                info!(%id, movies = touched, "actor removed from movies");
                Ok::<_, CatalogError>(())
            })
            .inspect_err(|e| {
                warn!(%id, error = %e, "actor deleted but movie cascade failed; movies may still reference it");
            })?;

        Ok(actor)
    }
}
