use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserLogin(String);

impl UserLogin {
    pub fn new(login: impl Into<String>) -> Self {
        Self(login.into())
    }
}
