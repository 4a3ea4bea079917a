//! Site index and height conversion over the calibrated site curves.

pub mod age;
pub mod breast_height;
pub mod equation;
pub mod growth_intercept;
pub mod height;
pub mod site;
pub mod smoothed;

pub use age::{age_to_age, AgeType};
pub use breast_height::{years_to_breast_height, years_to_breast_height_half};
pub use equation::SiteIndexEquation;
pub use growth_intercept::{growth_intercept_height, growth_intercept_index};
pub use height::{hu_garcia_h, hu_garcia_q, index_to_height};
pub use site::{height_to_index, height_to_index_by, site_iterate, SiteEstimation};
pub use smoothed::index_to_height_smoothed;
