use std::collections::HashSet;

use error_stack::Report;

use kernel::interface::query::FilmQuery;
use kernel::interface::update::FilmModifier;
use kernel::prelude::entity::{Film, FilmId, FilmPatch, NewFilm};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryFilmQuery;

#[async_trait::async_trait]
impl FilmQuery for InMemoryFilmQuery {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &FilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        check_positive(id)?;
        Ok(con.films().rows.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Film>, KernelError> {
        let mut films: Vec<Film> = con.films().rows.values().cloned().collect();
        films.sort_by_key(|film| *film.id().as_ref());
        Ok(films)
    }
}

pub struct InMemoryFilmModifier;

#[async_trait::async_trait]
impl FilmModifier for InMemoryFilmModifier {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        film: NewFilm,
    ) -> error_stack::Result<Film, KernelError> {
        let table = con.films_mut();
        let id = table.mint_id();
        let film = Film::new(
            id.clone(),
            film.name,
            film.description,
            film.release_date,
            film.duration,
            HashSet::new(),
        );
        table.rows.insert(id, film.clone());
        tracing::info!(
            "film '{}' stored with id {}",
            film.name().as_ref(),
            film.id().as_ref()
        );
        Ok(film)
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        patch: FilmPatch,
    ) -> error_stack::Result<Film, KernelError> {
        let FilmPatch {
            id,
            name,
            description,
            release_date,
            duration,
        } = patch;
        let film = con
            .films_mut()
            .rows
            .get_mut(&id)
            .ok_or_else(|| not_found(&id))?;
        film.substitute(|film| {
            if let Some(name) = name {
                *film.name = name;
            }
            if let Some(description) = description {
                *film.description = Some(description);
            }
            if let Some(release_date) = release_date {
                *film.release_date = release_date;
            }
            if let Some(duration) = duration {
                *film.duration = duration;
            }
        });
        let film = film.clone();
        tracing::info!("film {} updated", id.as_ref());
        Ok(film)
    }

    async fn save(
        &self,
        con: &mut InMemoryTransaction,
        film: &Film,
    ) -> error_stack::Result<(), KernelError> {
        match con.films_mut().rows.get_mut(film.id()) {
            Some(stored) => {
                *stored = film.clone();
                Ok(())
            }
            None => Err(not_found(film.id())),
        }
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &FilmId,
    ) -> error_stack::Result<(), KernelError> {
        check_positive(id)?;
        con.films_mut()
            .rows
            .remove(id)
            .ok_or_else(|| not_found(id))?;
        tracing::info!("film {} deleted", id.as_ref());
        Ok(())
    }

    async fn delete_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<(), KernelError> {
        let rows = &mut con.films_mut().rows;
        if rows.is_empty() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable("the film collection is already empty"));
        }
        rows.clear();
        tracing::info!("film collection cleared");
        Ok(())
    }
}

fn check_positive(id: &FilmId) -> error_stack::Result<(), KernelError> {
    let raw = *id.as_ref();
    if raw <= 0 {
        return Err(Report::new(KernelError::InvalidArgument)
            .attach_printable(format!("film id must be positive, got {raw}")));
    }
    Ok(())
}

fn not_found(id: &FilmId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("film with id {} not found", id.as_ref()))
}

#[cfg(test)]
mod test {
    use crate::database::memory::{InMemoryDatabase, InMemoryFilmModifier, InMemoryFilmQuery};
    use error_stack::Report;
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::FilmQuery;
    use kernel::interface::update::FilmModifier;
    use kernel::prelude::entity::{
        FilmDuration, FilmId, FilmName, FilmPatch, NewFilm, ReleaseDate, UserId,
    };
    use kernel::KernelError;
    use time::macros::date;

    fn new_film(name: &str) -> NewFilm {
        NewFilm {
            name: FilmName::new(name),
            description: None,
            release_date: ReleaseDate::new(date!(2000 - 01 - 01)),
            duration: FilmDuration::new(90),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_starting_at_one() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        for expected in 1i32..=3 {
            let film = InMemoryFilmModifier.create(&mut con, new_film("Solaris")).await?;
            assert_eq!(*film.id().as_ref(), expected);
            assert!(film.likes().is_empty());
        }
        con.commit().await
    }

    #[tokio::test]
    async fn find_by_id_rejects_non_positive_ids() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        for raw in [0, -5] {
            let report = InMemoryFilmQuery
                .find_by_id(&mut con, &FilmId::new(raw))
                .await
                .expect_err("non-positive ids are invalid");
            assert!(matches!(
                report.current_context(),
                KernelError::InvalidArgument
            ));
        }
        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        assert!(InMemoryFilmQuery
            .find_by_id(&mut con, &FilmId::new(42))
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_present_fields_and_keeps_likes() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let mut film = InMemoryFilmModifier.create(&mut con, new_film("Stalker")).await?;
        film.substitute(|film| {
            film.likes.insert(UserId::new(7i64));
        });
        InMemoryFilmModifier.save(&mut con, &film).await?;

        let updated = InMemoryFilmModifier
            .update(
                &mut con,
                FilmPatch {
                    id: film.id().clone(),
                    name: Some(FilmName::new("Stalker (restored)")),
                    description: None,
                    release_date: None,
                    duration: None,
                },
            )
            .await?;

        assert_eq!(updated.name().as_ref(), "Stalker (restored)");
        assert_eq!(updated.release_date(), film.release_date());
        assert!(updated.likes().contains(&UserId::new(7i64)));
        con.commit().await
    }

    #[tokio::test]
    async fn update_of_unknown_film_is_not_found() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let report = InMemoryFilmModifier
            .update(
                &mut con,
                FilmPatch {
                    id: FilmId::new(9),
                    name: None,
                    description: None,
                    release_date: None,
                    duration: None,
                },
            )
            .await
            .expect_err("nothing stored under id 9");
        assert!(matches!(report.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_film_and_ids_are_not_reused() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let first = InMemoryFilmModifier.create(&mut con, new_film("Alien")).await?;
        InMemoryFilmModifier.delete(&mut con, first.id()).await?;
        assert!(InMemoryFilmQuery
            .find_by_id(&mut con, first.id())
            .await?
            .is_none());

        let second = InMemoryFilmModifier.create(&mut con, new_film("Aliens")).await?;
        assert_eq!(*second.id().as_ref(), 2);
        con.commit().await
    }

    #[tokio::test]
    async fn delete_all_fails_on_an_empty_table() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let report = InMemoryFilmModifier
            .delete_all(&mut con)
            .await
            .expect_err("there is nothing to clear");
        assert!(matches!(report.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn find_all_returns_films_ordered_by_id() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        for name in ["Zardoz", "Brazil", "Dune"] {
            InMemoryFilmModifier.create(&mut con, new_film(name)).await?;
        }
        let names: Vec<_> = InMemoryFilmQuery
            .find_all(&mut con)
            .await?
            .iter()
            .map(|film| film.name().as_ref().clone())
            .collect();
        assert_eq!(names, ["Zardoz", "Brazil", "Dune"]);
        con.commit().await
    }
}
