use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
