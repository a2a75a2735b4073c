use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::hydrograph::{DEFAULT_NUM_POINTS, HydrographSeries, triangular_hydrograph};
use crate::inputs::{CatchmentInput, CoefficientParams, CurveNumberParams, StormDuration, StormInput};
use crate::runoff::{RunoffResult, coefficient_runoff_for, curve_number_runoff_for};
use crate::units::{VolumeResult, depth_to_volume};

// Runoff model choice, carrying its own parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Method {
    CurveNumber(CurveNumberParams),
    Coefficient(CoefficientParams),
}

impl Method {
    pub fn runoff(&self, storm: StormInput) -> RunoffResult {
        match *self {
            Method::CurveNumber(params) => curve_number_runoff_for(storm, params),
            Method::Coefficient(params) => coefficient_runoff_for(storm, params),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::CurveNumber(_) => "curve number",
            Method::Coefficient(_) => "coefficient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunoffRequest {
    pub storm: StormInput,
    pub catchment: CatchmentInput,
    pub method: Method,
    pub duration: StormDuration, // Runoff duration used for the hydrograph [hr]
    pub num_points: usize,
}

impl RunoffRequest {
    pub fn new(storm: StormInput, catchment: CatchmentInput, method: Method, duration: StormDuration) -> Self {
        RunoffRequest {
            storm,
            catchment,
            method,
            duration,
            num_points: DEFAULT_NUM_POINTS,
        }
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunoffReport {
    pub method: Method,
    pub runoff: RunoffResult,
    pub volume: VolumeResult,
    pub hydrograph: HydrographSeries,
}

/// Runs depth, volume, and hydrograph for one request.
///
/// Nothing is kept between calls; the report is the whole result.
pub fn estimate(request: &RunoffRequest) -> Result<RunoffReport> {
    let runoff = request.method.runoff(request.storm);
    let volume = depth_to_volume(runoff.q_mm, request.catchment.area_ha());
    let hydrograph = triangular_hydrograph(volume.v_m3, request.duration.hours(), request.num_points)?;

    debug!(
        method = request.method.name(),
        q_mm = runoff.q_mm,
        v_m3 = volume.v_m3,
        peak_discharge_m3s = hydrograph.peak_discharge_m3s(),
        "runoff estimated"
    );
    Ok(RunoffReport {
        method: request.method,
        runoff,
        volume,
        hydrograph,
    })
}

// Both methods side by side for the same storm and catchment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub curve_number: RunoffReport,
    pub coefficient: RunoffReport,
}

impl Comparison {
    // Shared time axis with one discharge column per method
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.curve_number
            .hydrograph
            .rows()
            .zip(self.coefficient.hydrograph.discharge_m3s().iter().copied())
            .map(|((t, q_cn), q_coef)| (t, q_cn, q_coef))
    }
}

pub fn compare(
    storm: StormInput,
    catchment: CatchmentInput,
    cn: CurveNumberParams,
    coefficient: CoefficientParams,
    duration: StormDuration,
    num_points: usize,
) -> Result<Comparison> {
    let request = RunoffRequest::new(storm, catchment, Method::CurveNumber(cn), duration)
        .with_num_points(num_points);
    let curve_number = estimate(&request)?;
    let coefficient = estimate(&RunoffRequest {
        method: Method::Coefficient(coefficient),
        ..request
    })?;
    Ok(Comparison {
        curve_number,
        coefficient,
    })
}
