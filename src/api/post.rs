pub mod prediction;
pub mod radio;
pub mod site;
pub mod user;

pub use self::{
    prediction::PredictionBuilder, radio::RadioBuilder, site::SiteBuilder, user::UserBuilder,
};
