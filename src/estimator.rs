use crate::error::YieldError;
use crate::estimation::{
    compute_utilization_components, estimate_stand_yield, StandUtilization, YieldEstimate,
};
use crate::models::{ControlMap, Stand};
use crate::reconcile::{reconcile_stand_diameters, DiameterReconciliation};

/// Groups the per-stand operations over one set of coefficient tables.
pub struct Estimator<'a> {
    control: &'a ControlMap,
    stand: &'a Stand,
}

impl<'a> Estimator<'a> {
    pub fn new(control: &'a ControlMap, stand: &'a Stand) -> Self {
        Self { control, stand }
    }

    /// Utilization components of every species plus the layer totals.
    pub fn utilization(&self) -> Result<StandUtilization, YieldError> {
        compute_utilization_components(self.control, self.stand)
    }

    /// Species diameters reconciled against the layer density.
    pub fn reconcile_diameters(&self) -> Result<DiameterReconciliation, YieldError> {
        self.stand.validate()?;
        reconcile_stand_diameters(self.control, self.stand)
    }

    /// Stand yield curves, if the stand carries what they need.
    pub fn yield_estimate(&self) -> Result<Option<YieldEstimate>, YieldError> {
        estimate_stand_yield(self.control, self.stand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::fixtures::{make_control, make_stand};

    #[test]
    fn test_utilization_matches_standalone() {
        let control = make_control();
        let stand = make_stand();
        let from_estimator = Estimator::new(&control, &stand).utilization().unwrap();
        let standalone = compute_utilization_components(&control, &stand).unwrap();
        assert_eq!(from_estimator.totals, standalone.totals);
        assert_eq!(from_estimator.species.len(), 3);
    }

    #[test]
    fn test_reconcile_matches_standalone() {
        let control = make_control();
        let stand = make_stand();
        let from_estimator = Estimator::new(&control, &stand).reconcile_diameters().unwrap();
        let standalone = reconcile_stand_diameters(&control, &stand).unwrap();
        assert_eq!(from_estimator.adjustment, standalone.adjustment);
    }

    #[test]
    fn test_yield_estimate_present() {
        let control = make_control();
        let stand = make_stand();
        let y = Estimator::new(&control, &stand).yield_estimate().unwrap().unwrap();
        assert!(y.base_area > 0.0);
        assert!(y.quad_mean_diameter >= 7.5);
    }

    #[test]
    fn test_yield_estimate_absent_without_group() {
        let control = make_control();
        let mut stand = make_stand();
        stand.basal_area_group = None;
        assert!(Estimator::new(&control, &stand).yield_estimate().unwrap().is_none());
    }

    #[test]
    fn test_reconcile_rejects_invalid_stand() {
        let control = make_control();
        let mut stand = make_stand();
        stand.species.clear();
        let err = Estimator::new(&control, &stand).reconcile_diameters().unwrap_err();
        assert!(matches!(err, YieldError::Validation(_)));
    }
}
