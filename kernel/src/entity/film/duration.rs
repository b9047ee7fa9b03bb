use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Film running time in whole minutes.
#[derive(Debug, Clone, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct FilmDuration(i32);

impl FilmDuration {
    pub fn new(minutes: impl Into<i32>) -> Self {
        Self(minutes.into())
    }
}
