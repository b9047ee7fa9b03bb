use kernel::prelude::entity::{DestructUser, User};
use time::Date;

#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub login: String,
    /// Effective display name: the stored name, or the login when the
    /// stored name is absent or blank.
    pub name: String,
    pub birthday: Date,
    pub friends: Vec<i64>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let name = value.display_name().to_string();
        let DestructUser {
            id,
            email,
            login,
            birthday,
            friends,
            ..
        } = value.into_destruct();
        let mut friends: Vec<i64> = friends.into_iter().map(i64::from).collect();
        friends.sort_unstable();
        Self {
            id: id.into(),
            email: email.into(),
            login: login.into(),
            name,
            birthday: birthday.into(),
            friends,
        }
    }
}

pub struct GetUserDto {
    pub id: i64,
}

pub struct DeleteUserDto {
    pub id: i64,
}

pub struct FriendshipDto {
    pub user_id: i64,
    pub friend_id: i64,
}

pub struct CommonFriendsDto {
    pub first_id: i64,
    pub second_id: i64,
}
