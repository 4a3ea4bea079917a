//! Spread the layer density over its species by a common diameter adjustment.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::YieldError;
use crate::estimation::{
    estimate_quad_mean_diameter_for_species, quad_mean_diameter, trees_per_hectare,
};
use crate::math::clamp;
use crate::models::{ComponentSizeLimits, ControlMap, DebugSettings, Stand, UtilizationClass};

use super::brent::{best_of, brent_root_find, find_interval, Interval};

/// Relative density error accepted from the root finder.
pub const TOLERANCE: f64 = 0.00001;

const DEFAULT_INTERVAL: Interval = Interval {
    start: -0.6,
    end: 0.5,
};
const MAX_EVALUATIONS: usize = 100;

/// One species entering reconciliation.
#[derive(Debug, Clone)]
pub struct ReconcileSpecies {
    pub genus: String,
    /// EMP060 estimate before the bounds are applied
    pub initial_quad_mean_diameter: f32,
    pub base_area: f32,
    pub lorey_height: f32,
    pub limits: ComponentSizeLimits,
}

/// Final diameter of one species.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledDiameter {
    pub genus: String,
    pub initial_quad_mean_diameter: f32,
    pub minimum: f32,
    pub maximum: f32,
    pub quad_mean_diameter: f32,
    pub base_area: f32,
    pub trees_per_hectare: f32,
}

/// Result of reconciling a layer.
#[derive(Debug, Clone, Serialize)]
pub struct DiameterReconciliation {
    /// Common log-scale adjustment applied to every species
    pub adjustment: f32,
    pub species: Vec<ReconciledDiameter>,
    /// Sum of the species densities
    pub trees_per_hectare: f32,
    pub quad_mean_diameter: f32,
}

/// `(min, max)` diameter for a species of the given lorey height.
pub fn species_dq_bounds(limits: &ComponentSizeLimits, lorey_height: f32) -> (f32, f32) {
    let min = (limits.min_quad_mean_diameter_lorey_height_ratio * lorey_height).max(7.6);
    let max = limits
        .quad_mean_diameter_maximum
        .min(limits.max_quad_mean_diameter_lorey_height_ratio * lorey_height.max(7.0))
        .max(7.75);
    (min, max)
}

/// Diameter of a species after applying adjustment `x`.
fn adjust_quad_mean_diameter(x: f32, initial: f32, min: f32, max: f32) -> f32 {
    let low = UtilizationClass::U75.low_bound();
    clamp(low + (initial - low) * x.exp(), min, max)
}

/// Relative density error as a function of the adjustment, remembering the
/// last two evaluations.
struct FractionalError<'a> {
    species: &'a [ReconcileSpecies],
    /// (initial, min, max) per species
    bounds: Vec<(f32, f32, f32)>,
    target: f32,
    finals: Vec<f32>,
    last_x: [f64; 2],
    last_f: [f64; 2],
}

impl<'a> FractionalError<'a> {
    fn new(species: &'a [ReconcileSpecies], target: f32) -> Self {
        let bounds = species
            .iter()
            .map(|s| {
                let (min, max) = species_dq_bounds(&s.limits, s.lorey_height);
                let initial = clamp(s.initial_quad_mean_diameter, min.max(7.75), max);
                (initial, min, max)
            })
            .collect();
        Self {
            species,
            bounds,
            target,
            finals: vec![0.0; species.len()],
            last_x: [0.0; 2],
            last_f: [0.0; 2],
        }
    }

    fn eval(&mut self, x: f64) -> f64 {
        let x_used = clamp(x as f32, -10.0, 10.0);
        let mut tph_sum = 0.0_f64;
        for (i, (sp, &(initial, min, max))) in self.species.iter().zip(&self.bounds).enumerate() {
            let dq = adjust_quad_mean_diameter(x_used, initial, min, max);
            self.finals[i] = dq;
            tph_sum += trees_per_hectare(sp.base_area, dq) as f64;
        }
        let error = ((tph_sum - self.target as f64) / self.target as f64) as f32 as f64;

        self.last_x = [x, self.last_x[0]];
        self.last_f = [error, self.last_f[0]];
        error
    }
}

/// Accept an inexact result, or fail when debug mode 1 asks for strictness.
fn accept_inexact(debug: &DebugSettings, cause: &YieldError) -> Result<(), YieldError> {
    if debug.get(DebugSettings::NO_BRACKETING_POLICY) == 2 {
        return Err(YieldError::NoAnswer(format!(
            "Could not find solution for quadratic mean diameter: {cause}"
        )));
    }
    warn!(
        %cause,
        "could not find exact solution for quadratic mean diameter, using inexact estimate"
    );
    Ok(())
}

/// Find the adjustment that makes the species densities sum to
/// `target_trees_per_hectare`.
pub fn reconcile_diameters(
    species: &[ReconcileSpecies],
    target_trees_per_hectare: f32,
    debug: &DebugSettings,
) -> Result<DiameterReconciliation, YieldError> {
    if species.is_empty() {
        return Err(YieldError::Validation("No species to reconcile".to_string()));
    }
    if !(target_trees_per_hectare > 0.0) {
        return Err(YieldError::Validation(format!(
            "Target trees per hectare must be positive, got {target_trees_per_hectare}"
        )));
    }

    let mut error = FractionalError::new(species, target_trees_per_hectare);

    let solved = find_interval(DEFAULT_INTERVAL, |x| error.eval(x)).and_then(|found| {
        brent_root_find(
            |x| error.eval(x),
            found.start,
            found.end,
            found.mid(),
            MAX_EVALUATIONS,
        )
    });

    let x = match solved {
        Ok(x) => x,
        Err(cause @ YieldError::NoBracketing(_)) => {
            accept_inexact(debug, &cause)?;
            best_of(|x| error.eval(x), &[0.0, -0.1, 0.1])?
        }
        Err(cause @ YieldError::TooManyEvaluations(_)) => {
            if error.last_f[0].abs() < 2.0 * TOLERANCE {
                accept_inexact(debug, &cause)?;
                error.last_x[0]
            } else {
                return Err(YieldError::NoAnswer(format!(
                    "Could not find solution for quadratic mean diameter, \
                     there appears to be a discontinuity: {cause}"
                )));
            }
        }
        Err(other) => return Err(other),
    };

    let residual = error.eval(x);
    debug!(x, residual, "diameter adjustment");

    let mut total_ba = 0.0;
    let mut total_tph = 0.0;
    let reconciled = species
        .iter()
        .zip(&error.bounds)
        .zip(&error.finals)
        .map(|((sp, &(initial, minimum, maximum)), &dq)| {
            let tph = trees_per_hectare(sp.base_area, dq);
            total_ba += sp.base_area;
            total_tph += tph;
            ReconciledDiameter {
                genus: sp.genus.clone(),
                initial_quad_mean_diameter: initial,
                minimum,
                maximum,
                quad_mean_diameter: dq,
                base_area: sp.base_area,
                trees_per_hectare: tph,
            }
        })
        .collect();

    Ok(DiameterReconciliation {
        adjustment: x as f32,
        species: reconciled,
        trees_per_hectare: total_tph,
        quad_mean_diameter: quad_mean_diameter(total_ba, total_tph),
    })
}

/// Estimate each species' diameter with EMP060 and reconcile them against
/// the stand density.
pub fn reconcile_stand_diameters(
    control: &ControlMap,
    stand: &Stand,
) -> Result<DiameterReconciliation, YieldError> {
    let fractions: HashMap<String, f32> = stand
        .species
        .iter()
        .map(|s| (s.genus.clone(), s.fraction))
        .collect();
    let stand_dq = stand.quad_mean_diameter();
    let target = trees_per_hectare(stand.base_area, stand_dq);

    let species = stand
        .species
        .iter()
        .map(|sp| {
            let initial = estimate_quad_mean_diameter_for_species(
                control,
                &sp.genus,
                sp.lorey_height,
                &fractions,
                stand.region,
                stand_dq,
                stand.base_area,
                target,
                stand.lorey_height,
            )?;
            Ok(ReconcileSpecies {
                genus: sp.genus.clone(),
                initial_quad_mean_diameter: initial,
                base_area: stand.species_base_area(sp),
                lorey_height: sp.lorey_height,
                limits: control.component_size_limits(&sp.genus, stand.region)?,
            })
        })
        .collect::<Result<Vec<_>, YieldError>>()?;

    reconcile_diameters(&species, target, &control.debug)
}
