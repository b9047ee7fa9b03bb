use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Film, FilmId, FilmPatch, NewFilm};
use crate::KernelError;

#[async_trait::async_trait]
pub trait FilmModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Mints the next film id and stores the film with an empty like set.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        film: NewFilm,
    ) -> error_stack::Result<Film, KernelError>;
    /// Merges the present patch fields onto the stored film, keeping the
    /// like set untouched.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        patch: FilmPatch,
    ) -> error_stack::Result<Film, KernelError>;
    /// Replaces the stored film wholesale; used to persist like-set changes.
    async fn save(
        &self,
        con: &mut Self::Transaction,
        film: &Film,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &FilmId,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete_all(&self, con: &mut Self::Transaction)
        -> error_stack::Result<(), KernelError>;
}

pub trait DependOnFilmModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type FilmModifier: FilmModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn film_modifier(&self) -> &Self::FilmModifier;
}
