mod film;
mod user;

pub use self::{film::*, user::*};
