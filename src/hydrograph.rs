//! Synthetic discharge hydrographs.
//!
//! The triangular shape is a placeholder generator: it spreads a runoff
//! volume over the storm duration as a symmetric triangle with the peak at
//! mid-duration. It is not a calibrated unit hydrograph and does no
//! convolution with a rainfall series.

use nalgebra::DVector;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, trace};

use crate::error::{HydroError, Result};
use crate::inputs::finite;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const DEFAULT_NUM_POINTS: usize = 100;

// Discharge time series with index-aligned time and discharge columns
#[derive(Debug, Clone, PartialEq)]
pub struct HydrographSeries {
    time_hr: DVector<f64>,       // Sample times [hr], from 0 to the duration
    discharge_m3s: DVector<f64>, // Discharge at each sample [m³/s]
    peak_discharge_m3s: f64,     // Peak of the continuous triangle [m³/s]
}

impl HydrographSeries {
    pub fn time_hr(&self) -> &DVector<f64> {
        &self.time_hr
    }

    pub fn discharge_m3s(&self) -> &DVector<f64> {
        &self.discharge_m3s
    }

    pub fn peak_discharge_m3s(&self) -> f64 {
        self.peak_discharge_m3s
    }

    pub fn len(&self) -> usize {
        self.time_hr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_hr.is_empty()
    }

    pub fn duration_hr(&self) -> f64 {
        self.time_hr.as_slice().last().copied().unwrap_or(0.0)
    }

    // (time [hr], discharge [m³/s]) pairs in time order, for tabular export
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_hr
            .iter()
            .copied()
            .zip(self.discharge_m3s.iter().copied())
    }

    /// Trapezoidal integral of discharge over time, in m³.
    pub fn volume_m3(&self) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }
        let dt = &self.time_hr.rows(1, n - 1) - &self.time_hr.rows(0, n - 1);
        let mean_q = (&self.discharge_m3s.rows(1, n - 1) + &self.discharge_m3s.rows(0, n - 1)) * 0.5;
        dt.dot(&mean_q) * SECONDS_PER_HOUR
    }
}

// Two equal-length numeric columns plus the peak
impl Serialize for HydrographSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HydrographSeries", 3)?;
        state.serialize_field("time_hr", self.time_hr.as_slice())?;
        state.serialize_field("discharge_m3s", self.discharge_m3s.as_slice())?;
        state.serialize_field("peak_discharge_m3s", &self.peak_discharge_m3s)?;
        state.end()
    }
}

// Evenly spaced samples over [0, end], both endpoints included exactly
pub(crate) fn linspace(end: f64, num_points: usize) -> DVector<f64> {
    let last = num_points - 1;
    DVector::from_fn(num_points, |i, _| {
        if i == last {
            end
        } else {
            // Divide first so large durations cannot overflow
            end * (i as f64 / last as f64)
        }
    })
}

/**
Builds a symmetric triangular hydrograph holding `v_m3` of runoff.

The triangle has base `duration_hr` and peaks at `duration_hr / 2`, so its
area equals the volume when `Qp = 2 V / duration_s`. Discharge is sampled
at `num_points` evenly spaced times over `[0, duration_hr]`.

# Errors
`InvalidParameter` when `duration_hr <= 0`, `v_m3 < 0`,
`num_points < 2`, or the duration is so short the peak is not finite.
*/
pub fn triangular_hydrograph(v_m3: f64, duration_hr: f64, num_points: usize) -> Result<HydrographSeries> {
    let duration_hr = finite("duration_hr", duration_hr)?;
    if duration_hr <= 0.0 {
        return Err(HydroError::invalid(
            "duration_hr",
            duration_hr,
            "duration must be strictly positive",
        ));
    }
    let v_m3 = finite("v_m3", v_m3)?;
    if v_m3 < 0.0 {
        return Err(HydroError::invalid("v_m3", v_m3, "volume must be non-negative"));
    }
    if num_points < 2 {
        return Err(HydroError::invalid(
            "num_points",
            num_points as f64,
            "a hydrograph needs at least its two endpoints",
        ));
    }

    let duration_s = duration_hr * SECONDS_PER_HOUR;
    let qp = 2.0 * v_m3 / duration_s;
    if !qp.is_finite() {
        return Err(HydroError::invalid(
            "duration_hr",
            duration_hr,
            "duration too short to carry the volume at a finite peak",
        ));
    }
    let peak_time = duration_hr / 2.0;

    let time_hr = linspace(duration_hr, num_points);
    let discharge_m3s = time_hr.map(|t| {
        let q = if t <= peak_time {
            qp * (t / peak_time)
        } else {
            qp * (1.0 - (t - peak_time) / peak_time)
        };
        // Rounding can push the tail slightly negative
        q.max(0.0)
    });
    trace!(?discharge_m3s, "triangular discharge samples");

    debug!(v_m3, duration_hr, num_points, peak_discharge_m3s = qp, "triangular hydrograph");
    Ok(HydrographSeries {
        time_hr,
        discharge_m3s,
        peak_discharge_m3s: qp,
    })
}

/// Rational-method peak discharge in m³/s, `Q = C i A / 360`.
///
/// `intensity_mm_hr` is the design rainfall intensity and `area_ha` the
/// catchment area; 1 mm/hr over 1 ha is 1/360 m³/s.
pub fn rational_peak_discharge(c: f64, intensity_mm_hr: f64, area_ha: f64) -> Result<f64> {
    let c = finite("c", c)?;
    if !(0.0..=1.0).contains(&c) {
        return Err(HydroError::invalid("c", c, "runoff coefficient must lie within [0, 1]"));
    }
    let intensity_mm_hr = finite("intensity_mm_hr", intensity_mm_hr)?;
    if intensity_mm_hr < 0.0 {
        return Err(HydroError::invalid(
            "intensity_mm_hr",
            intensity_mm_hr,
            "rainfall intensity must be non-negative",
        ));
    }
    let area_ha = finite("area_ha", area_ha)?;
    if area_ha <= 0.0 {
        return Err(HydroError::invalid(
            "area_ha",
            area_ha,
            "catchment area must be strictly positive",
        ));
    }
    let q = c * intensity_mm_hr * area_ha / 360.0;
    debug!(c, intensity_mm_hr, area_ha, q_m3s = q, "rational peak discharge");
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn three_point_triangle() {
        let h = triangular_hydrograph(1235.0, 6.0, 3).unwrap();
        let qp = 2.0 * 1235.0 / (6.0 * 3600.0);

        assert_eq!(h.time_hr().as_slice(), &[0.0, 3.0, 6.0]);
        assert_eq!(h.discharge_m3s()[0], 0.0);
        assert_relative_eq!(h.discharge_m3s()[1], qp, max_relative = 1e-12);
        assert_eq!(h.discharge_m3s()[2], 0.0);
        assert_relative_eq!(h.peak_discharge_m3s(), qp);
        assert_abs_diff_eq!(h.peak_discharge_m3s(), 0.1143, epsilon = 1e-4);
    }

    #[test]
    fn time_axis_spans_duration() {
        let h = triangular_hydrograph(500.0, 2.5, 37).unwrap();
        assert_eq!(h.len(), 37);
        assert_eq!(h.time_hr()[0], 0.0);
        assert_eq!(h.duration_hr(), 2.5);
        assert!(h.time_hr().as_slice().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(h.discharge_m3s()[36], 0.0);
        assert!(h.discharge_m3s().iter().all(|&q| q >= 0.0));
    }

    #[test]
    fn odd_sampling_conserves_volume_exactly() {
        for n in [3, 11, 201] {
            let h = triangular_hydrograph(1235.0, 6.0, n).unwrap();
            assert_relative_eq!(h.volume_m3(), 1235.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn volume_error_shrinks_with_more_points() {
        // Even counts never sample the peak itself
        let error = |n| {
            let h = triangular_hydrograph(1235.0, 6.0, n).unwrap();
            (h.volume_m3() - 1235.0).abs() / 1235.0
        };
        let (e10, e50, e200) = (error(10), error(50), error(200));
        assert!(e10 < 0.02);
        assert!(e50 < 1e-3);
        assert!(e200 < 5e-5);
        assert!(e10 > e50 && e50 > e200);
    }

    #[test]
    fn huge_duration_keeps_time_axis_ordered() {
        let h = triangular_hydrograph(1235.0, 1e308, 4).unwrap();
        let t = h.time_hr().as_slice();
        assert!(t.iter().all(|x| x.is_finite()));
        assert!(t.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(t[0], 0.0);
        assert_eq!(t[3], 1e308);
        assert!(h.discharge_m3s().iter().all(|q| q.is_finite()));
    }

    #[test]
    fn tiny_duration_never_yields_infinite_discharge() {
        let err = triangular_hydrograph(1235.0, 1e-320, 3).unwrap_err();
        assert!(err.is_invalid_parameter());

        // Finite peak, but qp / (duration / 2) alone would overflow
        let h = triangular_hydrograph(1235.0, 1e-160, 5).unwrap();
        let qp = h.peak_discharge_m3s();
        assert!(qp.is_finite());
        assert!(h.discharge_m3s().iter().all(|&q| q.is_finite() && q <= qp));
    }

    #[test]
    fn zero_volume_is_flat() {
        let h = triangular_hydrograph(0.0, 4.0, 9).unwrap();
        assert_eq!(h.peak_discharge_m3s(), 0.0);
        assert!(h.discharge_m3s().iter().all(|&q| q == 0.0));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(triangular_hydrograph(100.0, 0.0, 10).unwrap_err().is_invalid_parameter());
        assert!(triangular_hydrograph(100.0, -1.0, 10).unwrap_err().is_invalid_parameter());
        assert!(triangular_hydrograph(-1.0, 6.0, 10).unwrap_err().is_invalid_parameter());
        assert!(triangular_hydrograph(100.0, 6.0, 1).unwrap_err().is_invalid_parameter());
        assert!(triangular_hydrograph(100.0, f64::NAN, 10).is_err());
    }

    #[test]
    fn rows_pair_up_columns() {
        let h = triangular_hydrograph(1235.0, 6.0, 3).unwrap();
        let rows: Vec<_> = h.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (0.0, 0.0));
        assert_eq!(rows[2], (6.0, 0.0));
    }

    #[test]
    fn serializes_as_two_columns() {
        let h = triangular_hydrograph(1235.0, 6.0, 3).unwrap();
        let out: toml::Value = toml::from_str(&toml::to_string(&h).unwrap()).unwrap();
        let time = out["time_hr"].as_array().unwrap();
        let discharge = out["discharge_m3s"].as_array().unwrap();
        assert_eq!(time.len(), 3);
        assert_eq!(discharge.len(), time.len());
        assert_eq!(time[1].as_float(), Some(3.0));
    }

    #[test]
    fn rational_method() {
        assert_relative_eq!(rational_peak_discharge(1.0, 1.0, 1.0).unwrap(), 1.0 / 360.0);
        assert_relative_eq!(rational_peak_discharge(0.5, 36.0, 10.0).unwrap(), 0.5);
        assert!(rational_peak_discharge(1.2, 10.0, 1.0).is_err());
        assert!(rational_peak_discharge(0.5, 10.0, 0.0).is_err());
    }
}
