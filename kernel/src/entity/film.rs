mod description;
mod duration;
mod id;
mod name;
mod release_date;

pub use self::{description::*, duration::*, id::*, name::*, release_date::*};
use crate::entity::UserId;
use destructure::{Destructure, Mutation};
use std::collections::HashSet;
use time::Date;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Film {
    id: FilmId,
    name: FilmName,
    description: Option<FilmDescription>,
    release_date: ReleaseDate,
    duration: FilmDuration,
    likes: HashSet<UserId>,
}

impl Film {
    pub fn new(
        id: FilmId,
        name: FilmName,
        description: Option<FilmDescription>,
        release_date: ReleaseDate,
        duration: FilmDuration,
        likes: HashSet<UserId>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            release_date,
            duration,
            likes,
        }
    }
}

/// Candidate film as it arrives from the outside world. The same shape is
/// validated with the create rules or the update rules depending on the
/// operation.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FilmDraft {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Date>,
    pub duration: Option<i32>,
}

/// A draft that passed create validation. Carries no id; the storage layer
/// mints one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewFilm {
    pub name: FilmName,
    pub description: Option<FilmDescription>,
    pub release_date: ReleaseDate,
    pub duration: FilmDuration,
}

/// A draft that passed update validation. Fields left `None` keep their
/// stored value when merged.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FilmPatch {
    pub id: FilmId,
    pub name: Option<FilmName>,
    pub description: Option<FilmDescription>,
    pub release_date: Option<ReleaseDate>,
    pub duration: Option<FilmDuration>,
}
