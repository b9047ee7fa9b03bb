use kernel::prelude::entity::{DestructFilm, Film};
use time::Date;

#[derive(Debug, Clone)]
pub struct FilmDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Date,
    pub duration: i32,
    pub likes: Vec<i64>,
}

impl From<Film> for FilmDto {
    fn from(value: Film) -> Self {
        let DestructFilm {
            id,
            name,
            description,
            release_date,
            duration,
            likes,
        } = value.into_destruct();
        let mut likes: Vec<i64> = likes.into_iter().map(i64::from).collect();
        likes.sort_unstable();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.map(String::from),
            release_date: release_date.into(),
            duration: duration.into(),
            likes,
        }
    }
}

pub struct GetFilmDto {
    pub id: i32,
}

pub struct DeleteFilmDto {
    pub id: i32,
}

pub struct FilmLikeDto {
    pub film_id: i32,
    pub user_id: i64,
}

pub struct PopularFilmsDto {
    pub count: u32,
}
