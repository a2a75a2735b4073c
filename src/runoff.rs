/*!
Runoff depth from storm rainfall.

Two alternative models are provided and are never chained together:
the NRCS (formerly SCS) Curve Number method, and a quick coefficient
method where a fixed fraction of rainfall becomes runoff. Depths are in
millimeters throughout.
*/
use serde::Serialize;
use tracing::debug;

use crate::error::{HydroError, Result};
use crate::inputs::{CoefficientParams, CurveNumberParams, StormInput};

// Runoff depth, plus the CN intermediates when the CN method produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunoffResult {
    pub q_mm: f64,          // Runoff depth [mm]
    pub s_mm: Option<f64>,  // Potential maximum retention [mm]
    pub ia_mm: Option<f64>, // Initial abstraction [mm]
}

/**
Calculates runoff depth using the NRCS Curve Number method (metric form).

`S = 25400 / CN - 254`, `Ia = 0.2 * S`, and
`Q = (P - Ia)^2 / (P - Ia + S)` once rainfall exceeds `Ia`, zero before.

# Arguments
- `p_mm` - Storm rainfall in mm, non-negative.
- `cn` - Curve number, strictly between 0 and 100.

# Errors
`InvalidParameter` when either argument is outside its domain.
*/
pub fn curve_number_runoff(p_mm: f64, cn: f64) -> Result<RunoffResult> {
    let storm = StormInput::new(p_mm)?;
    let params = CurveNumberParams::new(cn)?;
    Ok(curve_number_runoff_for(storm, params))
}

// Infallible form over already validated inputs
pub fn curve_number_runoff_for(storm: StormInput, params: CurveNumberParams) -> RunoffResult {
    let p = storm.rainfall_mm();
    let cn = params.cn();

    let s = (25400.0 / cn) - 254.0;
    let ia = 0.2 * s;

    let q = if p <= ia {
        0.0
    } else {
        (p - ia).powi(2) / (p - ia + s)
    };

    debug!(p_mm = p, cn, s_mm = s, ia_mm = ia, q_mm = q, "curve number runoff");
    RunoffResult {
        q_mm: q,
        s_mm: Some(s),
        ia_mm: Some(ia),
    }
}

/// Runoff depth as a fixed fraction of rainfall, `Q = P * fraction`.
///
/// The fraction usually comes from a land-use lookup
/// (see [`crate::land_use::LandUseTable`]) or a user percentage.
pub fn coefficient_runoff(p_mm: f64, fraction: f64) -> Result<RunoffResult> {
    let storm = StormInput::new(p_mm)?;
    let params = CoefficientParams::new(fraction)?;
    Ok(coefficient_runoff_for(storm, params))
}

pub fn coefficient_runoff_for(storm: StormInput, params: CoefficientParams) -> RunoffResult {
    let q = storm.rainfall_mm() * params.fraction();
    debug!(
        p_mm = storm.rainfall_mm(),
        fraction = params.fraction(),
        q_mm = q,
        "coefficient runoff"
    );
    RunoffResult {
        q_mm: q,
        s_mm: None,
        ia_mm: None,
    }
}

// Antecedent moisture condition of the catchment before the storm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AntecedentMoisture {
    Dry, // AMC I
    #[default]
    Normal, // AMC II, the condition tabulated curve numbers assume
    Wet, // AMC III
}

/**
Converts an AMC II curve number to the requested moisture condition.

Uses `CN_I = 4.2 CN / (10 - 0.058 CN)` and `CN_III = 23 CN / (10 + 0.13 CN)`.
Both stay inside (0, 100) for any CN in (0, 100).
*/
pub fn adjust_curve_number(
    params: CurveNumberParams,
    amc: AntecedentMoisture,
) -> Result<CurveNumberParams> {
    let cn = params.cn();
    let adjusted = match amc {
        AntecedentMoisture::Dry => 4.2 * cn / (10.0 - 0.058 * cn),
        AntecedentMoisture::Normal => cn,
        AntecedentMoisture::Wet => 23.0 * cn / (10.0 + 0.13 * cn),
    };
    debug!(cn, ?amc, adjusted, "curve number adjusted for antecedent moisture");
    CurveNumberParams::new(adjusted)
}

// Rough CN by hydrologic soil group when nothing better is known
pub fn suggest_curve_number(soil_group: &str) -> Result<CurveNumberParams> {
    let cn = match soil_group.trim().to_uppercase().as_str() {
        "A" => 30.0, // sandy, low runoff
        "B" => 60.0, // loam
        "C" => 75.0, // silty / clay
        "D" => 90.0, // urban / impervious
        _ => {
            return Err(HydroError::UnknownCategory(format!(
                "hydrologic soil group '{}'",
                soil_group
            )));
        }
    };
    CurveNumberParams::new(cn)
}

/**
Tabulated NRCS curve number for AMC II, by hydrologic soil group and land use.

This is a short selection of the TR-55 tables. Land use is matched
case-insensitively, e.g. "row crops good", "pasture fair", "woods poor".
*/
pub fn tabulated_curve_number(soil_group: &str, land_use: &str) -> Result<CurveNumberParams> {
    let cn = match (
        soil_group.trim().to_uppercase().as_str(),
        land_use.trim().to_lowercase().as_str(),
    ) {
        // Row crops, straight row
        ("A", "row crops poor") => 72.0,
        ("B", "row crops poor") => 81.0,
        ("C", "row crops poor") => 88.0,
        ("D", "row crops poor") => 91.0,

        ("A", "row crops good") => 67.0,
        ("B", "row crops good") => 78.0,
        ("C", "row crops good") => 85.0,
        ("D", "row crops good") => 89.0,

        // Pasture, grassland, or range
        ("A", "pasture poor") => 68.0,
        ("B", "pasture poor") => 79.0,
        ("C", "pasture poor") => 86.0,
        ("D", "pasture poor") => 89.0,

        ("A", "pasture fair") => 49.0,
        ("B", "pasture fair") => 69.0,
        ("C", "pasture fair") => 79.0,
        ("D", "pasture fair") => 84.0,

        ("A", "pasture good") => 39.0,
        ("B", "pasture good") => 61.0,
        ("C", "pasture good") => 74.0,
        ("D", "pasture good") => 80.0,

        ("A", "woods poor") => 45.0,
        ("B", "woods poor") => 66.0,
        ("C", "woods poor") => 77.0,
        ("D", "woods poor") => 83.0,

        ("A", "woods good") => 30.0,
        ("B", "woods good") => 55.0,
        ("C", "woods good") => 70.0,
        ("D", "woods good") => 77.0,

        // Paved parking lots, roofs, driveways
        ("A" | "B" | "C" | "D", "impervious") => 98.0,

        _ => {
            return Err(HydroError::UnknownCategory(format!(
                "soil group '{}' with land use '{}'",
                soil_group, land_use
            )));
        }
    };
    CurveNumberParams::new(cn)
}
