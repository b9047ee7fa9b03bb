use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    DeleteFilmRequest, FilmLikeRequest, FilmRequest, FilmTransformer, GetFilmRequest,
    PopularFilmsRequest,
};
use crate::response::{CreatedFilmPresenter, FilmPresenter};
use application::service::{
    CreateFilmService, DeleteFilmService, GetFilmService, LikeFilmService, PopularFilmService,
    UpdateFilmService,
};
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_extra::extract::Query;

pub trait FilmRouter {
    fn route_film(self) -> Self;
}

impl FilmRouter for Router<AppModule> {
    fn route_film(self) -> Self {
        self.route(
            "/films",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), FilmPresenter)
                    .bypass(|| handler.database().get_all_films())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(handler): State<AppModule>, Json(req): Json<FilmRequest>| async move {
                    Controller::new(FilmTransformer, CreatedFilmPresenter)
                        .intake(req)
                        .handle(|draft| handler.database().create_film(draft))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(handler): State<AppModule>, Json(req): Json<FilmRequest>| async move {
                    Controller::new(FilmTransformer, FilmPresenter)
                        .intake(req)
                        .handle(|draft| handler.database().update_film(draft))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(|State(handler): State<AppModule>| async move {
                Controller::new((), FilmPresenter)
                    .bypass(|| handler.database().delete_all_films())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/films/popular",
            get(
                |State(handler): State<AppModule>,
                 Query(req): Query<PopularFilmsRequest>| async move {
                    let default_count = *handler.settings().most_liked_count();
                    Controller::new(FilmTransformer, FilmPresenter)
                        .intake((req, default_count))
                        .handle(|dto| handler.database().most_liked_films(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/films/:id",
            get(
                |State(handler): State<AppModule>, Path(id): Path<i32>| async move {
                    Controller::new(FilmTransformer, FilmPresenter)
                        .intake(GetFilmRequest::new(id))
                        .handle(|dto| handler.database().get_film(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>, Path(id): Path<i32>| async move {
                    Controller::new(FilmTransformer, FilmPresenter)
                        .intake(DeleteFilmRequest::new(id))
                        .handle(|dto| handler.database().delete_film(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/films/:id/like/:user_id",
            put(
                |State(handler): State<AppModule>,
                 Path((film_id, user_id)): Path<(i32, i64)>| async move {
                    Controller::new(FilmTransformer, FilmPresenter)
                        .intake(FilmLikeRequest::new(film_id, user_id))
                        .handle(|dto| handler.database().put_like(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>,
                 Path((film_id, user_id)): Path<(i32, i64)>| async move {
                    Controller::new(FilmTransformer, FilmPresenter)
                        .intake(FilmLikeRequest::new(film_id, user_id))
                        .handle(|dto| handler.database().delete_like(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
