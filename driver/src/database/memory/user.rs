use std::collections::HashSet;

use error_stack::Report;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{NewUser, User, UserId, UserPatch};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryUserQuery;

#[async_trait::async_trait]
impl UserQuery for InMemoryUserQuery {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        check_positive(id)?;
        Ok(con.users().rows.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let mut users: Vec<User> = con.users().rows.values().cloned().collect();
        users.sort_by_key(|user| *user.id().as_ref());
        Ok(users)
    }
}

pub struct InMemoryUserModifier;

#[async_trait::async_trait]
impl UserModifier for InMemoryUserModifier {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        user: NewUser,
    ) -> error_stack::Result<User, KernelError> {
        let table = con.users_mut();
        let id = table.mint_id();
        let user = User::new(
            id.clone(),
            user.email,
            user.login,
            user.name,
            user.birthday,
            HashSet::new(),
        );
        table.rows.insert(id, user.clone());
        tracing::info!(
            "user '{}' stored with id {}",
            user.display_name(),
            user.id().as_ref()
        );
        Ok(user)
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        patch: UserPatch,
    ) -> error_stack::Result<User, KernelError> {
        let UserPatch {
            id,
            email,
            login,
            name,
            birthday,
        } = patch;
        let user = con
            .users_mut()
            .rows
            .get_mut(&id)
            .ok_or_else(|| not_found(&id))?;
        user.substitute(|user| {
            if let Some(email) = email {
                *user.email = email;
            }
            if let Some(login) = login {
                *user.login = login;
            }
            if let Some(name) = name {
                *user.name = Some(name);
            }
            if let Some(birthday) = birthday {
                *user.birthday = birthday;
            }
        });
        let user = user.clone();
        tracing::info!("user {} updated", id.as_ref());
        Ok(user)
    }

    async fn save(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        match con.users_mut().rows.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(not_found(user.id())),
        }
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        check_positive(id)?;
        con.users_mut()
            .rows
            .remove(id)
            .ok_or_else(|| not_found(id))?;
        tracing::info!("user {} deleted", id.as_ref());
        Ok(())
    }

    async fn delete_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<(), KernelError> {
        let rows = &mut con.users_mut().rows;
        if rows.is_empty() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable("the user collection is already empty"));
        }
        rows.clear();
        tracing::info!("user collection cleared");
        Ok(())
    }
}

fn check_positive(id: &UserId) -> error_stack::Result<(), KernelError> {
    let raw = *id.as_ref();
    if raw <= 0 {
        return Err(Report::new(KernelError::InvalidArgument)
            .attach_printable(format!("user id must be positive, got {raw}")));
    }
    Ok(())
}

fn not_found(id: &UserId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("user with id {} not found", id.as_ref()))
}
