use tracing::info;

use super::input::{validate_name, MoviePatch, MovieQuery, NewMovie};
use super::Catalog;
use crate::error::CatalogError;
use crate::id::{IdProvider, MOVIE_PREFIX};
use crate::model::{Document, Movie, MovieDocument};
use crate::store::DocumentStore;

impl<S: DocumentStore, I: IdProvider> Catalog<S, I> {
    /// List movies matching the query, in stored order.
    pub fn list_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError> {
        let doc: MovieDocument = self.store.load()?;
        Ok(doc
            .peliculas
            .into_iter()
            .filter(|m| query.matches(m))
            .collect())
    }

    pub fn get_movie(&self, id: &str) -> Result<Movie, CatalogError> {
        let doc: MovieDocument = self.store.load()?;
        doc.find(id)
            .cloned()
            .ok_or_else(|| CatalogError::movie_not_found(id))
    }

    pub fn create_movie(&self, input: NewMovie) -> Result<Movie, CatalogError> {
        validate_name(&input.name)?;
        self.locks.with_lock(MovieDocument::NAME, || {
            let mut doc: MovieDocument = self.store.load()?;
            let id = self.fresh_id(MOVIE_PREFIX, |id| doc.contains(id))?;
            let mut movie = Movie {
                id,
                name: input.name,
                release_year: input.release_year,
                actor_ids: input.actor_ids,
            };
            movie.dedup_actors();
            doc.peliculas.push(movie.clone());
            self.store.save(&doc)?;
            info!(id = %movie.id, name = %movie.name, "movie created");
            Ok(movie)
        })
    }

    /// Apply the fields present in `patch`. An empty patch changes nothing.
    pub fn update_movie(&self, id: &str, patch: MoviePatch) -> Result<Movie, CatalogError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        self.locks.with_lock(MovieDocument::NAME, || {
            let mut doc: MovieDocument = self.store.load()?;
            let movie = doc
                .find_mut(id)
                .ok_or_else(|| CatalogError::movie_not_found(id))?;
            if patch.is_empty() {
                return Ok(movie.clone());
            }
            if let Some(name) = patch.name {
                movie.name = name;
            }
            if let Some(year) = patch.release_year {
                movie.release_year = year;
            }
            movie.dedup_actors();
            let updated = movie.clone();
            self.store.save(&doc)?;
            info!(%id, "movie updated");
            Ok(updated)
        })
    }

    /// Add an actor id to a movie's cast. The id is not checked against the
    /// actor collection; adding a member again is a no-op.
    pub fn add_actor_to_movie(&self, movie_id: &str, actor_id: &str) -> Result<Movie, CatalogError> {
        if actor_id.trim().is_empty() {
            return Err(CatalogError::invalid("actorId must be a non-empty string"));
        }
        self.locks.with_lock(MovieDocument::NAME, || {
            let mut doc: MovieDocument = self.store.load()?;
            let movie = doc
                .find_mut(movie_id)
                .ok_or_else(|| CatalogError::movie_not_found(movie_id))?;
            let added = movie.add_actor(actor_id);
            let deduped = movie.dedup_actors();
            let updated = movie.clone();
            if added || deduped {
                self.store.save(&doc)?;
                info!(%movie_id, %actor_id, "actor added to movie");
            }
            Ok(updated)
        })
    }

    /// Remove an actor id from a movie's cast. Removing a non-member succeeds.
    pub fn remove_actor_from_movie(
        &self,
        movie_id: &str,
        actor_id: &str,
    ) -> Result<Movie, CatalogError> {
        self.locks.with_lock(MovieDocument::NAME, || {
            let mut doc: MovieDocument = self.store.load()?;
            let movie = doc
                .find_mut(movie_id)
                .ok_or_else(|| CatalogError::movie_not_found(movie_id))?;
            let removed = movie.remove_actor(actor_id);
            let deduped = movie.dedup_actors();
            let updated = movie.clone();
            if removed || deduped {
                self.store.save(&doc)?;
                info!(%movie_id, %actor_id, "actor removed from movie");
            }
            Ok(updated)
        })
    }

    /// Delete a movie, returning the removed record.
    pub fn delete_movie(&self, id: &str) -> Result<Movie, CatalogError> {
        self.locks.with_lock(MovieDocument::NAME, || {
            let mut doc: MovieDocument = self.store.load()?;
            let movie = doc.take(id).ok_or_else(|| CatalogError::movie_not_found(id))?;
            self.store.save(&doc)?;
            info!(%id, "movie deleted");
            Ok(movie)
        })
    }
}
