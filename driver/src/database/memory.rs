use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnFilmQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnFilmModifier, DependOnUserModifier};
use kernel::prelude::entity::{Film, FilmId, User, UserId};
use kernel::KernelError;

pub use self::{film::*, user::*};

mod film;
mod user;

/// Process-wide in-memory database: one film table and one user table
/// behind a single command-serializing lock. A transaction owns the lock
/// guard, so a service sequence holds exclusive access from `transact`
/// until `commit` drops the guard.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<StoreRoot>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
pub(in crate::database) struct StoreRoot {
    films: FilmTable,
    users: UserTable,
}

pub(in crate::database) struct FilmTable {
    pub(in crate::database) rows: HashMap<FilmId, Film>,
    next_id: i32,
}

impl Default for FilmTable {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }
}

impl FilmTable {
    /// Ids start at 1 and are never reused, even after deletions.
    pub(in crate::database) fn mint_id(&mut self) -> FilmId {
        let id = FilmId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

pub(in crate::database) struct UserTable {
    pub(in crate::database) rows: HashMap<UserId, User>,
    next_id: i64,
}

impl Default for UserTable {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }
}

impl UserTable {
    pub(in crate::database) fn mint_id(&mut self) -> UserId {
        let id = UserId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreRoot>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn films(&self) -> &FilmTable {
        &self.guard.films
    }

    pub(in crate::database) fn films_mut(&mut self) -> &mut FilmTable {
        &mut self.guard.films
    }

    pub(in crate::database) fn users(&self) -> &UserTable {
        &self.guard.users
    }

    pub(in crate::database) fn users_mut(&mut self) -> &mut UserTable {
        &mut self.guard.users
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        // Mutations are applied in place; committing releases the lock.
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        Ok(InMemoryTransaction { guard })
    }
}

impl DependOnFilmQuery for InMemoryDatabase {
    type FilmQuery = InMemoryFilmQuery;
    fn film_query(&self) -> &Self::FilmQuery {
        &InMemoryFilmQuery
    }
}

impl DependOnFilmModifier for InMemoryDatabase {
    type FilmModifier = InMemoryFilmModifier;
    fn film_modifier(&self) -> &Self::FilmModifier {
        &InMemoryFilmModifier
    }
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = InMemoryUserQuery;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserQuery
    }
}

impl DependOnUserModifier for InMemoryDatabase {
    type UserModifier = InMemoryUserModifier;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserModifier
    }
}
