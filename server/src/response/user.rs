use crate::controller::Exhaust;
use application::transfer::UserDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::Date;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    id: i64,
    email: String,
    login: String,
    name: String,
    birthday: Date,
    user_friends: Vec<i64>,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            email: value.email,
            login: value.login,
            name: value.name,
            birthday: value.birthday,
            user_friends: value.friends,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedUserResponse(UserResponse);

impl IntoResponse for CreatedUserResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self.0)).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<UserDto> for UserPresenter {
    type To = UserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        UserResponse::from(input)
    }
}

impl Exhaust<Vec<UserDto>> for UserPresenter {
    type To = axum::Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

/// Friend and common-friend queries answer with plain id arrays.
impl Exhaust<Vec<i64>> for UserPresenter {
    type To = axum::Json<Vec<i64>>;
    fn emit(&self, input: Vec<i64>) -> Self::To {
        axum::Json::from(input)
    }
}

impl Exhaust<()> for UserPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}

pub struct CreatedUserPresenter;

impl Exhaust<UserDto> for CreatedUserPresenter {
    type To = CreatedUserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        CreatedUserResponse(UserResponse::from(input))
    }
}
