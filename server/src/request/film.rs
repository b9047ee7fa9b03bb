use crate::controller::Intake;
use application::transfer::{DeleteFilmDto, FilmLikeDto, GetFilmDto, PopularFilmsDto};
use kernel::prelude::entity::FilmDraft;
use serde::Deserialize;
use time::Date;

/// Body of both `POST /films` and `PUT /films`; which rule set applies is
/// decided by the route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    id: Option<i32>,
    name: Option<String>,
    description: Option<String>,
    release_date: Option<Date>,
    duration: Option<i32>,
}

#[derive(Debug)]
pub struct GetFilmRequest {
    id: i32,
}

impl GetFilmRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteFilmRequest {
    id: i32,
}

impl DeleteFilmRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct FilmLikeRequest {
    film_id: i32,
    user_id: i64,
}

impl FilmLikeRequest {
    pub fn new(film_id: i32, user_id: i64) -> Self {
        Self { film_id, user_id }
    }
}

#[derive(Debug, Deserialize)]
pub struct PopularFilmsRequest {
    count: Option<u32>,
}

pub struct FilmTransformer;

impl Intake<FilmRequest> for FilmTransformer {
    type To = FilmDraft;
    fn emit(&self, input: FilmRequest) -> Self::To {
        FilmDraft {
            id: input.id,
            name: input.name,
            description: input.description,
            release_date: input.release_date,
            duration: input.duration,
        }
    }
}

impl Intake<GetFilmRequest> for FilmTransformer {
    type To = GetFilmDto;
    fn emit(&self, input: GetFilmRequest) -> Self::To {
        GetFilmDto { id: input.id }
    }
}

impl Intake<DeleteFilmRequest> for FilmTransformer {
    type To = DeleteFilmDto;
    fn emit(&self, input: DeleteFilmRequest) -> Self::To {
        DeleteFilmDto { id: input.id }
    }
}

impl Intake<FilmLikeRequest> for FilmTransformer {
    type To = FilmLikeDto;
    fn emit(&self, input: FilmLikeRequest) -> Self::To {
        FilmLikeDto {
            film_id: input.film_id,
            user_id: input.user_id,
        }
    }
}

impl Intake<(PopularFilmsRequest, u32)> for FilmTransformer {
    type To = PopularFilmsDto;
    fn emit(&self, (input, default_count): (PopularFilmsRequest, u32)) -> Self::To {
        PopularFilmsDto {
            count: input.count.unwrap_or(default_count),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::request::film::FilmRequest;
    use time::macros::date;

    #[test]
    fn film_request_reads_camel_case_json() {
        let request: FilmRequest = serde_json::from_str(
            r#"{"name":"Le Voyage dans la Lune","releaseDate":"1902-09-01","duration":14}"#,
        )
        .expect("body is well-formed");
        assert_eq!(request.name.as_deref(), Some("Le Voyage dans la Lune"));
        assert_eq!(request.release_date, Some(date!(1902 - 09 - 01)));
        assert_eq!(request.duration, Some(14));
        assert!(request.id.is_none());
        assert!(request.description.is_none());
    }
}
