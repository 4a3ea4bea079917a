pub mod error;
pub mod estimation;
pub mod io;
pub mod math;
pub mod models;
pub mod reconcile;
pub mod site_index;
pub mod visualization;

mod estimator;

pub use error::YieldError;
pub use estimator::Estimator;
pub use io::{ReportWriter, StandReader};
pub use models::{ControlMap, SpeciesStand, Stand, UtilizationClass, UtilizationVector};
pub use site_index::{height_to_index, index_to_height, AgeType, SiteIndexEquation};
