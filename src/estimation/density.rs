/// π / 40000: converts dq² (cm²) × trees/ha to base area in m²/ha.
pub const PI_40K: f32 = (std::f64::consts::PI / 40_000.0) as f32;

/// Trees per hectare for a base area (m²/ha) and quadratic mean diameter (cm).
///
/// Zero unless both inputs are positive.
pub fn trees_per_hectare(base_area: f32, quad_mean_diameter: f32) -> f32 {
    if base_area > 0.0 && quad_mean_diameter > 0.0 {
        base_area / PI_40K / (quad_mean_diameter * quad_mean_diameter)
    } else {
        0.0
    }
}

/// Quadratic mean diameter (cm) for a base area and density.
///
/// Zero for non-positive or NaN inputs, and for either input above 1e6.
pub fn quad_mean_diameter(base_area: f32, trees_per_hectare: f32) -> f32 {
    if base_area > 1e6
        || trees_per_hectare > 1e6
        || base_area.is_nan()
        || trees_per_hectare.is_nan()
    {
        0.0
    } else if base_area > 0.0 && trees_per_hectare > 0.0 {
        (base_area / trees_per_hectare / PI_40K).sqrt()
    } else {
        0.0
    }
}

/// Base area (m²/ha) of `trees_per_hectare` stems of diameter `quad_mean_diameter`.
pub fn base_area(quad_mean_diameter: f32, trees_per_hectare: f32) -> f32 {
    if quad_mean_diameter.is_nan() || trees_per_hectare.is_nan() {
        0.0
    } else {
        quad_mean_diameter * quad_mean_diameter * PI_40K * trees_per_hectare
    }
}
