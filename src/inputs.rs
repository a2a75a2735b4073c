use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result};

// Rejects NaN and infinities before any range check
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(HydroError::invalid(name, value, "must be a finite number"))
    }
}

// Storm rainfall depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct StormInput {
    rainfall_mm: f64, // Total storm rainfall [mm]
}

impl StormInput {
    pub fn new(rainfall_mm: f64) -> Result<Self> {
        let rainfall_mm = finite("rainfall_mm", rainfall_mm)?;
        if rainfall_mm < 0.0 {
            return Err(HydroError::invalid(
                "rainfall_mm",
                rainfall_mm,
                "rainfall must be non-negative",
            ));
        }
        Ok(StormInput { rainfall_mm })
    }

    pub fn rainfall_mm(&self) -> f64 {
        self.rainfall_mm
    }
}

impl TryFrom<f64> for StormInput {
    type Error = HydroError;

    fn try_from(rainfall_mm: f64) -> Result<Self> {
        StormInput::new(rainfall_mm)
    }
}

impl From<StormInput> for f64 {
    fn from(storm: StormInput) -> f64 {
        storm.rainfall_mm
    }
}

/// Catchment draining to the outlet, stored in hectares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CatchmentInput {
    area_ha: f64, // Catchment area [ha]
}

impl CatchmentInput {
    pub fn from_hectares(area_ha: f64) -> Result<Self> {
        let area_ha = finite("area_ha", area_ha)?;
        if area_ha <= 0.0 {
            return Err(HydroError::invalid(
                "area_ha",
                area_ha,
                "catchment area must be strictly positive",
            ));
        }
        Ok(CatchmentInput { area_ha })
    }

    // 1 km² = 100 ha
    pub fn from_km2(area_km2: f64) -> Result<Self> {
        let area_km2 = finite("area_km2", area_km2)?;
        if area_km2 <= 0.0 {
            return Err(HydroError::invalid(
                "area_km2",
                area_km2,
                "catchment area must be strictly positive",
            ));
        }
        Self::from_hectares(crate::units::km2_to_hectares(area_km2))
    }

    pub fn area_ha(&self) -> f64 {
        self.area_ha
    }
}

impl TryFrom<f64> for CatchmentInput {
    type Error = HydroError;

    fn try_from(area_ha: f64) -> Result<Self> {
        CatchmentInput::from_hectares(area_ha)
    }
}

impl From<CatchmentInput> for f64 {
    fn from(catchment: CatchmentInput) -> f64 {
        catchment.area_ha
    }
}

// Runoff duration the hydrograph is spread over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct StormDuration {
    hours: f64, // [hr]
}

impl StormDuration {
    pub fn from_hours(hours: f64) -> Result<Self> {
        let hours = finite("duration_hr", hours)?;
        if hours <= 0.0 {
            return Err(HydroError::invalid(
                "duration_hr",
                hours,
                "duration must be strictly positive",
            ));
        }
        Ok(StormDuration { hours })
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }
}

impl TryFrom<f64> for StormDuration {
    type Error = HydroError;

    fn try_from(hours: f64) -> Result<Self> {
        StormDuration::from_hours(hours)
    }
}

impl From<StormDuration> for f64 {
    fn from(duration: StormDuration) -> f64 {
        duration.hours
    }
}

/// NRCS curve number, restricted to the open interval (0, 100).
///
/// CN = 100 means zero potential retention and is rejected rather than
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CurveNumberParams {
    cn: f64,
}

impl CurveNumberParams {
    pub fn new(cn: f64) -> Result<Self> {
        let cn = finite("cn", cn)?;
        if cn <= 0.0 || cn >= 100.0 {
            return Err(HydroError::invalid(
                "cn",
                cn,
                "curve number must lie strictly between 0 and 100",
            ));
        }
        Ok(CurveNumberParams { cn })
    }

    pub fn cn(&self) -> f64 {
        self.cn
    }
}

impl TryFrom<f64> for CurveNumberParams {
    type Error = HydroError;

    fn try_from(cn: f64) -> Result<Self> {
        CurveNumberParams::new(cn)
    }
}

impl From<CurveNumberParams> for f64 {
    fn from(params: CurveNumberParams) -> f64 {
        params.cn
    }
}

/// Fraction of rainfall that becomes runoff, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CoefficientParams {
    fraction: f64,
}

impl CoefficientParams {
    pub fn new(fraction: f64) -> Result<Self> {
        let fraction = finite("fraction", fraction)?;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(HydroError::invalid(
                "fraction",
                fraction,
                "runoff fraction must lie within [0, 1]",
            ));
        }
        Ok(CoefficientParams { fraction })
    }

    // Only for compile-time constants already known to lie in [0, 1]
    pub(crate) const fn from_constant(fraction: f64) -> Self {
        CoefficientParams { fraction }
    }

    // User-supplied percentage, 0 to 100
    pub fn from_percent(percent: f64) -> Result<Self> {
        let percent = finite("percent", percent)?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(HydroError::invalid(
                "percent",
                percent,
                "runoff percentage must lie within [0, 100]",
            ));
        }
        Self::new(percent / 100.0)
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

impl TryFrom<f64> for CoefficientParams {
    type Error = HydroError;

    fn try_from(fraction: f64) -> Result<Self> {
        CoefficientParams::new(fraction)
    }
}

impl From<CoefficientParams> for f64 {
    fn from(params: CoefficientParams) -> f64 {
        params.fraction
    }
}
