//! Diameter reconciliation for the primary layer.

pub mod brent;
pub mod diameter;

pub use brent::{best_of, brent_root_find, find_interval, BrentSolver, Interval};
pub use diameter::{
    reconcile_diameters, reconcile_stand_diameters, species_dq_bounds, DiameterReconciliation,
    ReconcileSpecies, ReconciledDiameter, TOLERANCE,
};
