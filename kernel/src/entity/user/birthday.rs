use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserBirthday(Date);

impl UserBirthday {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
