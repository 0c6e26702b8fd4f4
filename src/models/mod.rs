pub mod icons;
pub mod portfolio;
pub mod reviews;
pub mod services;

pub use icons::Icon;
