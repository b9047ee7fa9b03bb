use std::cmp::Ordering;

use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnFilmQuery, DependOnUserQuery, FilmQuery, UserQuery};
use kernel::interface::update::{DependOnFilmModifier, FilmModifier};
use kernel::interface::validation::{validate_film_patch, validate_new_film};
use kernel::prelude::entity::{Film, FilmDraft, FilmId, UserId};
use kernel::KernelError;

use crate::transfer::{DeleteFilmDto, FilmDto, FilmLikeDto, GetFilmDto, PopularFilmsDto};

#[async_trait::async_trait]
pub trait GetFilmService: 'static + Sync + Send + DependOnFilmQuery {
    async fn get_film(&self, dto: GetFilmDto) -> error_stack::Result<FilmDto, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let id = FilmId::new(dto.id);
        let film = self
            .film_query()
            .find_by_id(&mut con, &id)
            .await?
            .ok_or_else(|| film_not_found(dto.id))?;
        con.commit().await?;
        Ok(FilmDto::from(film))
    }

    async fn get_all_films(&self) -> error_stack::Result<Vec<FilmDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let films = self.film_query().find_all(&mut con).await?;
        con.commit().await?;
        Ok(films.into_iter().map(FilmDto::from).collect())
    }
}

impl<T> GetFilmService for T where T: DependOnFilmQuery {}

#[async_trait::async_trait]
pub trait CreateFilmService: 'static + Sync + Send + DependOnFilmModifier {
    async fn create_film(&self, draft: FilmDraft) -> error_stack::Result<FilmDto, KernelError> {
        let film = validate_new_film(draft)?;
        let mut con = self.database_connection().transact().await?;
        let film = self.film_modifier().create(&mut con, film).await?;
        con.commit().await?;
        Ok(FilmDto::from(film))
    }
}

impl<T> CreateFilmService for T where T: DependOnFilmModifier {}

#[async_trait::async_trait]
pub trait UpdateFilmService: 'static + Sync + Send + DependOnFilmModifier {
    async fn update_film(&self, draft: FilmDraft) -> error_stack::Result<FilmDto, KernelError> {
        let patch = validate_film_patch(draft)?;
        let mut con = self.database_connection().transact().await?;
        let film = self.film_modifier().update(&mut con, patch).await?;
        con.commit().await?;
        Ok(FilmDto::from(film))
    }
}

impl<T> UpdateFilmService for T where T: DependOnFilmModifier {}

#[async_trait::async_trait]
pub trait DeleteFilmService: 'static + Sync + Send + DependOnFilmModifier {
    async fn delete_film(&self, dto: DeleteFilmDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        self.film_modifier()
            .delete(&mut con, &FilmId::new(dto.id))
            .await?;
        con.commit().await
    }

    async fn delete_all_films(&self) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        self.film_modifier().delete_all(&mut con).await?;
        con.commit().await
    }
}

impl<T> DeleteFilmService for T where T: DependOnFilmModifier {}

#[async_trait::async_trait]
pub trait LikeFilmService:
    'static + Sync + Send + DependOnFilmQuery + DependOnUserQuery + DependOnFilmModifier
{
    async fn put_like(&self, dto: FilmLikeDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        let (mut film, user_id) =
            resolve_like_target(self.film_query(), self.user_query(), &mut con, &dto).await?;
        if film.likes().contains(&user_id) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "user {} has already liked film {}",
                dto.user_id, dto.film_id
            )));
        }
        film.substitute(|film| {
            film.likes.insert(user_id);
        });
        self.film_modifier().save(&mut con, &film).await?;
        con.commit().await?;
        tracing::info!("user {} liked film {}", dto.user_id, dto.film_id);
        Ok(())
    }

    async fn delete_like(&self, dto: FilmLikeDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        let (mut film, user_id) =
            resolve_like_target(self.film_query(), self.user_query(), &mut con, &dto).await?;
        if !film.likes().contains(&user_id) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "user {} has not liked film {}",
                dto.user_id, dto.film_id
            )));
        }
        film.substitute(|film| {
            film.likes.remove(&user_id);
        });
        self.film_modifier().save(&mut con, &film).await?;
        con.commit().await?;
        tracing::info!("user {} removed the like from film {}", dto.user_id, dto.film_id);
        Ok(())
    }

}

impl<T> LikeFilmService for T where
    T: DependOnFilmQuery + DependOnUserQuery + DependOnFilmModifier
{
}

/// Resolves both sides of a like relation, failing with `NotFound` for
/// whichever entity is missing.
async fn resolve_like_target<FQ, UQ>(
    film_query: &FQ,
    user_query: &UQ,
    con: &mut FQ::Transaction,
    dto: &FilmLikeDto,
) -> error_stack::Result<(Film, UserId), KernelError>
where
    FQ: FilmQuery,
    UQ: UserQuery<Transaction = FQ::Transaction>,
{
    let film_id = FilmId::new(dto.film_id);
    let user_id = UserId::new(dto.user_id);
    let film = film_query
        .find_by_id(con, &film_id)
        .await?
        .ok_or_else(|| film_not_found(dto.film_id))?;
    user_query
        .find_by_id(con, &user_id)
        .await?
        .ok_or_else(|| user_not_found(dto.user_id))?;
    Ok((film, user_id))
}

#[async_trait::async_trait]
pub trait PopularFilmService: 'static + Sync + Send + DependOnFilmQuery {
    /// Up to `count` films: films with likes first, ordered by like count
    /// descending; films without likes afterwards, ordered by name.
    async fn most_liked_films(
        &self,
        dto: PopularFilmsDto,
    ) -> error_stack::Result<Vec<FilmDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let mut films = self.film_query().find_all(&mut con).await?;
        con.commit().await?;
        if films.is_empty() {
            return Err(
                Report::new(KernelError::NotFound).attach_printable("no films are stored yet")
            );
        }
        films.sort_by(popularity_order);
        films.truncate(dto.count as usize);
        Ok(films.into_iter().map(FilmDto::from).collect())
    }
}

impl<T> PopularFilmService for T where T: DependOnFilmQuery {}

fn popularity_order(left: &Film, right: &Film) -> Ordering {
    match (left.likes().len(), right.likes().len()) {
        (0, 0) => folded_name(left).cmp(&folded_name(right)),
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (first, second) => second
            .cmp(&first)
            .then_with(|| folded_name(left).cmp(&folded_name(right))),
    }
}

fn folded_name(film: &Film) -> String {
    film.name().as_ref().to_lowercase()
}

fn film_not_found(id: i32) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("film with id {id} not found"))
}

fn user_not_found(id: i64) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("user with id {id} not found"))
}

#[cfg(test)]
mod test {
    use crate::service::{
        CreateFilmService, CreateUserService, GetFilmService, LikeFilmService, PopularFilmService,
        UpdateFilmService,
    };
    use crate::transfer::{FilmDto, FilmLikeDto, GetFilmDto, PopularFilmsDto, UserDto};
    use driver::database::InMemoryDatabase;
    use error_stack::Report;
    use kernel::prelude::entity::{FilmDraft, UserDraft};
    use kernel::KernelError;
    use time::macros::date;

    async fn seed_film(
        db: &InMemoryDatabase,
        name: &str,
    ) -> Result<FilmDto, Report<KernelError>> {
        db.create_film(FilmDraft {
            id: None,
            name: Some(name.to_string()),
            description: None,
            release_date: Some(date!(1999 - 03 - 31)),
            duration: Some(136),
        })
        .await
    }

    async fn seed_user(
        db: &InMemoryDatabase,
        login: &str,
    ) -> Result<UserDto, Report<KernelError>> {
        db.create_user(UserDraft {
            id: None,
            email: Some(format!("{login}@example.com")),
            login: Some(login.to_string()),
            name: None,
            birthday: Some(date!(1985 - 07 - 03)),
        })
        .await
    }

    #[tokio::test]
    async fn put_like_is_recorded_once() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let film = seed_film(&db, "The Matrix").await?;
        let user = seed_user(&db, "neo_1999").await?;

        db.put_like(FilmLikeDto {
            film_id: film.id,
            user_id: user.id,
        })
        .await?;

        let stored = db.get_film(GetFilmDto { id: film.id }).await?;
        assert_eq!(stored.likes, vec![user.id]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_like_is_a_conflict() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let film = seed_film(&db, "The Matrix").await?;
        let user = seed_user(&db, "neo_1999").await?;
        let dto = || FilmLikeDto {
            film_id: film.id,
            user_id: user.id,
        };

        db.put_like(dto()).await?;
        let report = db.put_like(dto()).await.expect_err("second like must fail");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        let stored = db.get_film(GetFilmDto { id: film.id }).await?;
        assert_eq!(stored.likes.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn like_requires_existing_film_and_user() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let film = seed_film(&db, "The Matrix").await?;
        let user = seed_user(&db, "neo_1999").await?;

        let report = db
            .put_like(FilmLikeDto {
                film_id: 999,
                user_id: user.id,
            })
            .await
            .expect_err("film 999 does not exist");
        assert!(matches!(report.current_context(), KernelError::NotFound));

        let report = db
            .put_like(FilmLikeDto {
                film_id: film.id,
                user_id: 999,
            })
            .await
            .expect_err("user 999 does not exist");
        assert!(matches!(report.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn removing_an_absent_like_is_a_conflict() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let film = seed_film(&db, "The Matrix").await?;
        let user = seed_user(&db, "neo_1999").await?;

        let report = db
            .delete_like(FilmLikeDto {
                film_id: film.id,
                user_id: user.id,
            })
            .await
            .expect_err("no like to remove");
        assert!(matches!(report.current_context(), KernelError::Conflict));
        Ok(())
    }

    #[tokio::test]
    async fn delete_like_removes_the_membership() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let film = seed_film(&db, "The Matrix").await?;
        let user = seed_user(&db, "neo_1999").await?;
        let dto = || FilmLikeDto {
            film_id: film.id,
            user_id: user.id,
        };

        db.put_like(dto()).await?;
        db.delete_like(dto()).await?;

        let stored = db.get_film(GetFilmDto { id: film.id }).await?;
        assert!(stored.likes.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_preserves_likes() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let film = seed_film(&db, "The Matrix").await?;
        let user = seed_user(&db, "neo_1999").await?;
        db.put_like(FilmLikeDto {
            film_id: film.id,
            user_id: user.id,
        })
        .await?;

        let updated = db
            .update_film(FilmDraft {
                id: Some(film.id),
                name: Some("The Matrix Reloaded".to_string()),
                description: Some("More agents.".to_string()),
                release_date: None,
                duration: None,
            })
            .await?;

        assert_eq!(updated.name, "The Matrix Reloaded");
        assert_eq!(updated.likes, vec![user.id]);
        Ok(())
    }

    #[tokio::test]
    async fn create_film_runs_create_validation() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let report = db
            .create_film(FilmDraft {
                id: None,
                name: None,
                description: None,
                release_date: Some(date!(2010 - 07 - 16)),
                duration: Some(148),
            })
            .await
            .expect_err("name is required on create");
        assert!(matches!(report.current_context(), KernelError::Validation));
        Ok(())
    }

    #[tokio::test]
    async fn most_liked_orders_liked_films_first_then_alphabetical() -> Result<(), Report<KernelError>>
    {
        let db = InMemoryDatabase::new();
        let twice_liked = seed_film(&db, "Solaris").await?;
        let once_liked = seed_film(&db, "Stalker").await?;
        let beta = seed_film(&db, "Beta").await?;
        let alpha = seed_film(&db, "alpha").await?;

        let first = seed_user(&db, "first_fan").await?;
        let second = seed_user(&db, "second_fan").await?;
        for user_id in [first.id, second.id] {
            db.put_like(FilmLikeDto {
                film_id: twice_liked.id,
                user_id,
            })
            .await?;
        }
        db.put_like(FilmLikeDto {
            film_id: once_liked.id,
            user_id: first.id,
        })
        .await?;

        let ranking = db.most_liked_films(PopularFilmsDto { count: 10 }).await?;
        let ids: Vec<_> = ranking.iter().map(|film| film.id).collect();
        assert_eq!(ids, vec![twice_liked.id, once_liked.id, alpha.id, beta.id]);
        Ok(())
    }

    #[tokio::test]
    async fn most_liked_clamps_count_to_collection_size() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        seed_film(&db, "Solaris").await?;
        seed_film(&db, "Stalker").await?;

        let ranking = db.most_liked_films(PopularFilmsDto { count: 50 }).await?;
        assert_eq!(ranking.len(), 2);

        let ranking = db.most_liked_films(PopularFilmsDto { count: 1 }).await?;
        assert_eq!(ranking.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn most_liked_on_empty_collection_is_not_found() -> Result<(), Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let report = db
            .most_liked_films(PopularFilmsDto { count: 10 })
            .await
            .expect_err("no films stored");
        assert!(matches!(report.current_context(), KernelError::NotFound));
        Ok(())
    }
}
