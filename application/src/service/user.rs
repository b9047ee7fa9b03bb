use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::interface::validation::{validate_new_user, validate_user_patch};
use kernel::prelude::entity::{User, UserDraft, UserId};
use kernel::KernelError;

use crate::transfer::{CommonFriendsDto, DeleteUserDto, FriendshipDto, GetUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<UserDto, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let id = UserId::new(dto.id);
        let user = self
            .user_query()
            .find_by_id(&mut con, &id)
            .await?
            .ok_or_else(|| user_not_found(dto.id))?;
        con.commit().await?;
        Ok(UserDto::from(user))
    }

    async fn get_all_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut con).await?;
        con.commit().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn create_user(&self, draft: UserDraft) -> error_stack::Result<UserDto, KernelError> {
        let user = validate_new_user(draft)?;
        let mut con = self.database_connection().transact().await?;
        let user = self.user_modifier().create(&mut con, user).await?;
        con.commit().await?;
        Ok(UserDto::from(user))
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait UpdateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn update_user(&self, draft: UserDraft) -> error_stack::Result<UserDto, KernelError> {
        let patch = validate_user_patch(draft)?;
        let mut con = self.database_connection().transact().await?;
        let user = self.user_modifier().update(&mut con, patch).await?;
        con.commit().await?;
        Ok(UserDto::from(user))
    }
}

impl<T> UpdateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait DeleteUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn delete_user(&self, dto: DeleteUserDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        self.user_modifier()
            .delete(&mut con, &UserId::new(dto.id))
            .await?;
        con.commit().await
    }

    async fn delete_all_users(&self) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        self.user_modifier().delete_all(&mut con).await?;
        con.commit().await
    }
}

impl<T> DeleteUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait FriendshipService: 'static + Sync + Send + DependOnUserQuery + DependOnUserModifier {
    /// Records the friendship on both sides; friendship is symmetric by
    /// construction. Both inserts happen inside one transaction.
    async fn add_friend(&self, dto: FriendshipDto) -> error_stack::Result<(), KernelError> {
        ensure_distinct(
            dto.user_id,
            dto.friend_id,
            "users cannot add themselves as a friend",
        )?;
        let mut con = self.database_connection().transact().await?;
        let (mut user, mut friend) =
            resolve_pair(self.user_query(), &mut con, dto.user_id, dto.friend_id).await?;
        let user_id = user.id().clone();
        let friend_id = friend.id().clone();
        if user.friends().contains(&friend_id) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "users {} and {} are already friends",
                dto.user_id, dto.friend_id
            )));
        }
        user.substitute(|user| {
            user.friends.insert(friend_id);
        });
        friend.substitute(|friend| {
            friend.friends.insert(user_id);
        });
        self.user_modifier().save(&mut con, &user).await?;
        self.user_modifier().save(&mut con, &friend).await?;
        con.commit().await?;
        tracing::info!("users {} and {} are now friends", dto.user_id, dto.friend_id);
        Ok(())
    }

    async fn delete_friend(&self, dto: FriendshipDto) -> error_stack::Result<(), KernelError> {
        ensure_distinct(
            dto.user_id,
            dto.friend_id,
            "users cannot remove themselves from friends",
        )?;
        let mut con = self.database_connection().transact().await?;
        let (mut user, mut friend) =
            resolve_pair(self.user_query(), &mut con, dto.user_id, dto.friend_id).await?;
        let user_id = user.id().clone();
        let friend_id = friend.id().clone();
        if !user.friends().contains(&friend_id) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "users {} and {} are not friends",
                dto.user_id, dto.friend_id
            )));
        }
        user.substitute(|user| {
            user.friends.remove(&friend_id);
        });
        friend.substitute(|friend| {
            friend.friends.remove(&user_id);
        });
        self.user_modifier().save(&mut con, &user).await?;
        self.user_modifier().save(&mut con, &friend).await?;
        con.commit().await?;
        tracing::info!(
            "users {} and {} are no longer friends",
            dto.user_id,
            dto.friend_id
        );
        Ok(())
    }

    /// Snapshot of the user's friend ids; an empty set is a normal answer.
    async fn user_friends(&self, dto: GetUserDto) -> error_stack::Result<Vec<i64>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.id))
            .await?
            .ok_or_else(|| user_not_found(dto.id))?;
        con.commit().await?;
        Ok(sorted_ids(user.friends().iter()))
    }

    /// Intersection of both users' friend sets; empty when they share none.
    async fn common_friends(
        &self,
        dto: CommonFriendsDto,
    ) -> error_stack::Result<Vec<i64>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let (first, second) =
            resolve_pair(self.user_query(), &mut con, dto.first_id, dto.second_id).await?;
        con.commit().await?;
        Ok(sorted_ids(first.friends().intersection(second.friends())))
    }
}

impl<T> FriendshipService for T where T: DependOnUserQuery + DependOnUserModifier {}

async fn resolve_pair<Q>(
    query: &Q,
    con: &mut Q::Transaction,
    first_id: i64,
    second_id: i64,
) -> error_stack::Result<(User, User), KernelError>
where
    Q: UserQuery,
{
    let first = query.find_by_id(con, &UserId::new(first_id)).await?;
    let second = query.find_by_id(con, &UserId::new(second_id)).await?;
    match (first, second) {
        (Some(first), Some(second)) => Ok((first, second)),
        (first, second) => {
            let mut missing = Vec::new();
            if first.is_none() {
                missing.push(first_id.to_string());
            }
            if second.is_none() {
                missing.push(second_id.to_string());
            }
            Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "users with ids {} not found",
                missing.join(", ")
            )))
        }
    }
}

fn ensure_distinct(
    user_id: i64,
    friend_id: i64,
    message: &str,
) -> error_stack::Result<(), KernelError> {
    if user_id == friend_id {
        return Err(Report::new(KernelError::InvalidArgument).attach_printable(message.to_string()));
    }
    Ok(())
}

fn sorted_ids<'a>(ids: impl Iterator<Item = &'a UserId>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.map(|id| *id.as_ref()).collect();
    ids.sort_unstable();
    ids
}

fn user_not_found(id: i64) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("user with id {id} not found"))
}
