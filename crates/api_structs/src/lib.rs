mod reservation;
mod resource;
mod status;

pub mod dtos {
    pub use crate::reservation::dtos::*;
    pub use crate::resource::dtos::*;
}

pub use crate::reservation::api::*;
pub use crate::resource::api::*;
pub use crate::status::api::*;
