mod birthday;
mod email;
mod id;
mod login;
mod name;

pub use self::{birthday::*, email::*, id::*, login::*, name::*};
use destructure::{Destructure, Mutation};
use std::collections::HashSet;
use time::Date;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct User {
    id: UserId,
    email: UserEmail,
    login: UserLogin,
    name: Option<UserName>,
    birthday: UserBirthday,
    friends: HashSet<UserId>,
}

impl User {
    pub fn new(
        id: UserId,
        email: UserEmail,
        login: UserLogin,
        name: Option<UserName>,
        birthday: UserBirthday,
        friends: HashSet<UserId>,
    ) -> Self {
        Self {
            id,
            email,
            login,
            name,
            birthday,
            friends,
        }
    }

    /// Display name shown to other users. Falls back to the login when no
    /// name is stored or the stored name is blank; computed on read, never
    /// persisted.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.as_ref().trim().is_empty() => name.as_ref(),
            _ => self.login.as_ref(),
        }
    }
}

/// Candidate user from the outside world, validated with either the create
/// or the update rule set.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct UserDraft {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<Date>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewUser {
    pub email: UserEmail,
    pub login: UserLogin,
    pub name: Option<UserName>,
    pub birthday: UserBirthday,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserPatch {
    pub id: UserId,
    pub email: Option<UserEmail>,
    pub login: Option<UserLogin>,
    pub name: Option<UserName>,
    pub birthday: Option<UserBirthday>,
}
