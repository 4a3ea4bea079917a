mod control;
mod stand;
mod utilization;

pub use control::{
    ComponentSizeLimits, ControlMap, DebugSettings, HeightSource, NonPrimaryHeightCoefficients,
    Region,
};
pub use stand::{SiteCurve, SpeciesStand, Stand, VolumeAdjustments};
pub use utilization::{UtilizationClass, UtilizationVector};
