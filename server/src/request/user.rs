use crate::controller::Intake;
use application::transfer::{CommonFriendsDto, DeleteUserDto, FriendshipDto, GetUserDto};
use kernel::prelude::entity::UserDraft;
use serde::Deserialize;
use time::Date;

/// Body of both `POST /users` and `PUT /users`.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    id: Option<i64>,
    email: Option<String>,
    login: Option<String>,
    name: Option<String>,
    birthday: Option<Date>,
}

#[derive(Debug)]
pub struct GetUserRequest {
    id: i64,
}

impl GetUserRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteUserRequest {
    id: i64,
}

impl DeleteUserRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct FriendshipRequest {
    user_id: i64,
    friend_id: i64,
}

impl FriendshipRequest {
    pub fn new(user_id: i64, friend_id: i64) -> Self {
        Self { user_id, friend_id }
    }
}

#[derive(Debug)]
pub struct CommonFriendsRequest {
    first_id: i64,
    second_id: i64,
}

impl CommonFriendsRequest {
    pub fn new(first_id: i64, second_id: i64) -> Self {
        Self {
            first_id,
            second_id,
        }
    }
}

pub struct UserTransformer;

impl Intake<UserRequest> for UserTransformer {
    type To = UserDraft;
    fn emit(&self, input: UserRequest) -> Self::To {
        UserDraft {
            id: input.id,
            email: input.email,
            login: input.login,
            name: input.name,
            birthday: input.birthday,
        }
    }
}

impl Intake<GetUserRequest> for UserTransformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<DeleteUserRequest> for UserTransformer {
    type To = DeleteUserDto;
    fn emit(&self, input: DeleteUserRequest) -> Self::To {
        DeleteUserDto { id: input.id }
    }
}

impl Intake<FriendshipRequest> for UserTransformer {
    type To = FriendshipDto;
    fn emit(&self, input: FriendshipRequest) -> Self::To {
        FriendshipDto {
            user_id: input.user_id,
            friend_id: input.friend_id,
        }
    }
}

impl Intake<CommonFriendsRequest> for UserTransformer {
    type To = CommonFriendsDto;
    fn emit(&self, input: CommonFriendsRequest) -> Self::To {
        CommonFriendsDto {
            first_id: input.first_id,
            second_id: input.second_id,
        }
    }
}
