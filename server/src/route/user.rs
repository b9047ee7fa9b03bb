use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CommonFriendsRequest, DeleteUserRequest, FriendshipRequest, GetUserRequest, UserRequest,
    UserTransformer,
};
use crate::response::{CreatedUserPresenter, UserPresenter};
use application::service::{
    CreateUserService, DeleteUserService, FriendshipService, GetUserService, UpdateUserService,
};
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), UserPresenter)
                    .bypass(|| handler.database().get_all_users())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(handler): State<AppModule>, Json(req): Json<UserRequest>| async move {
                    Controller::new(UserTransformer, CreatedUserPresenter)
                        .intake(req)
                        .handle(|draft| handler.database().create_user(draft))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(handler): State<AppModule>, Json(req): Json<UserRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(req)
                        .handle(|draft| handler.database().update_user(draft))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(|State(handler): State<AppModule>| async move {
                Controller::new((), UserPresenter)
                    .bypass(|| handler.database().delete_all_users())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/users/:id",
            get(
                |State(handler): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| handler.database().get_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(DeleteUserRequest::new(id))
                        .handle(|dto| handler.database().delete_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/friends",
            get(
                |State(handler): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| handler.database().user_friends(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(
                |State(handler): State<AppModule>,
                 Path((first_id, second_id)): Path<(i64, i64)>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(CommonFriendsRequest::new(first_id, second_id))
                        .handle(|dto| handler.database().common_friends(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/friends/:friend_id",
            put(
                |State(handler): State<AppModule>,
                 Path((user_id, friend_id)): Path<(i64, i64)>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(FriendshipRequest::new(user_id, friend_id))
                        .handle(|dto| handler.database().add_friend(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>,
                 Path((user_id, friend_id)): Path<(i64, i64)>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(FriendshipRequest::new(user_id, friend_id))
                        .handle(|dto| handler.database().delete_friend(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
