//! Storm runoff depth, volume, and synthetic hydrographs for small catchments.
//!
//! Runoff depth comes from either the NRCS Curve Number method or a runoff
//! coefficient; it is turned into a volume over the catchment and spread
//! over the storm duration as a triangular hydrograph. All functions are
//! pure and keep no state between calls.

mod error;
mod estimate;
mod hydrograph;
mod inputs;
mod land_use;
mod runoff;
mod units;

pub use error::{HydroError, Result};
pub use estimate::{Comparison, Method, RunoffReport, RunoffRequest, compare, estimate};
pub use hydrograph::{DEFAULT_NUM_POINTS, HydrographSeries, rational_peak_discharge, triangular_hydrograph};
pub use inputs::{CatchmentInput, CoefficientParams, CurveNumberParams, StormDuration, StormInput};
pub use land_use::{LandUse, LandUseTable};
pub use runoff::{
    AntecedentMoisture, RunoffResult, adjust_curve_number, coefficient_runoff, coefficient_runoff_for,
    curve_number_runoff, curve_number_runoff_for, suggest_curve_number, tabulated_curve_number,
};
pub use units::{VolumeResult, depth_to_volume, km2_to_hectares, volume_to_depth};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn storm_to_hydrograph() {
        let runoff = curve_number_runoff(50.0, 75.0).unwrap();
        assert_abs_diff_eq!(runoff.s_mm.unwrap(), 84.67, epsilon = 0.005);
        assert_abs_diff_eq!(runoff.ia_mm.unwrap(), 16.93, epsilon = 0.005);

        let volume = depth_to_volume(12.35, 10.0);
        assert_relative_eq!(volume.v_m3, 1235.0, max_relative = 1e-12);

        let hydrograph = triangular_hydrograph(volume.v_m3, 6.0, 3).unwrap();
        assert_eq!(hydrograph.time_hr().as_slice(), &[0.0, 3.0, 6.0]);
        assert_abs_diff_eq!(hydrograph.peak_discharge_m3s(), 0.1143, epsilon = 1e-4);
    }

    #[test]
    fn land_use_feeds_coefficient_method() {
        let table = LandUseTable::default();
        let params = table.fraction("agriculture").unwrap();
        let runoff = coefficient_runoff(50.0, params.fraction()).unwrap();
        assert_eq!(runoff.q_mm, 12.5);
    }

    #[test]
    fn km2_catchment_through_estimate() {
        let request = RunoffRequest::new(
            StormInput::new(50.0).unwrap(),
            CatchmentInput::from_km2(0.1).unwrap(),
            Method::Coefficient(CoefficientParams::from_percent(25.0).unwrap()),
            StormDuration::from_hours(6.0).unwrap(),
        )
        .with_num_points(201);
        let report = estimate(&request).unwrap();
        assert_relative_eq!(report.volume.v_m3, 1250.0, max_relative = 1e-12);
        assert_relative_eq!(report.hydrograph.volume_m3(), 1250.0, max_relative = 1e-9);
    }

    #[test]
    fn wet_catchment_runs_off_more() {
        let cn = tabulated_curve_number("B", "pasture fair").unwrap();
        let wet = adjust_curve_number(cn, AntecedentMoisture::Wet).unwrap();
        let storm = StormInput::new(60.0).unwrap();
        assert!(curve_number_runoff_for(storm, wet).q_mm > curve_number_runoff_for(storm, cn).q_mm);
    }
}
