use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{NewUser, User, UserId, UserPatch};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Mints the next user id and stores the user with an empty friend set.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        user: NewUser,
    ) -> error_stack::Result<User, KernelError>;
    /// Merges the present patch fields onto the stored user, keeping the
    /// friend set untouched.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        patch: UserPatch,
    ) -> error_stack::Result<User, KernelError>;
    /// Replaces the stored user wholesale; used to persist friend-set
    /// changes.
    async fn save(
        &self,
        con: &mut Self::Transaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &UserId,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete_all(&self, con: &mut Self::Transaction)
        -> error_stack::Result<(), KernelError>;
}

pub trait DependOnUserModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type UserModifier: UserModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn user_modifier(&self) -> &Self::UserModifier;
}
