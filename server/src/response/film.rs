use crate::controller::Exhaust;
use application::transfer::FilmDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::Date;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmResponse {
    id: i32,
    name: String,
    description: Option<String>,
    release_date: Date,
    duration: i32,
    film_likes: Vec<i64>,
}

impl From<FilmDto> for FilmResponse {
    fn from(value: FilmDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            release_date: value.release_date,
            duration: value.duration,
            film_likes: value.likes,
        }
    }
}

impl IntoResponse for FilmResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedFilmResponse(FilmResponse);

impl IntoResponse for CreatedFilmResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self.0)).into_response()
    }
}

pub struct FilmPresenter;

impl Exhaust<FilmDto> for FilmPresenter {
    type To = FilmResponse;
    fn emit(&self, input: FilmDto) -> Self::To {
        FilmResponse::from(input)
    }
}

impl Exhaust<Vec<FilmDto>> for FilmPresenter {
    type To = axum::Json<Vec<FilmResponse>>;
    fn emit(&self, input: Vec<FilmDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(FilmResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

impl Exhaust<()> for FilmPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}

pub struct CreatedFilmPresenter;

impl Exhaust<FilmDto> for CreatedFilmPresenter {
    type To = CreatedFilmResponse;
    fn emit(&self, input: FilmDto) -> Self::To {
        CreatedFilmResponse(FilmResponse::from(input))
    }
}
