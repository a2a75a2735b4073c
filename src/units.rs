use serde::Serialize;
use tracing::debug;

pub const M2_PER_HECTARE: f64 = 10_000.0;
pub const HECTARES_PER_KM2: f64 = 100.0;
const MM_PER_M: f64 = 1000.0;

// Runoff volume over the catchment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeResult {
    pub v_m3: f64, // Runoff volume [m³]
}

pub fn km2_to_hectares(area_km2: f64) -> f64 {
    area_km2 * HECTARES_PER_KM2
}

pub fn hectares_to_m2(area_ha: f64) -> f64 {
    area_ha * M2_PER_HECTARE
}

/**
Converts a runoff depth over a catchment to a volume.

`V = (Q / 1000) * A`, with `A` in m². The caller guarantees `area_ha > 0`
(see `CatchmentInput`); non-negative depths give non-negative volumes.
*/
pub fn depth_to_volume(q_mm: f64, area_ha: f64) -> VolumeResult {
    let a_m2 = hectares_to_m2(area_ha);
    let v_m3 = (q_mm / MM_PER_M) * a_m2;
    debug!(q_mm, area_ha, v_m3, "depth converted to volume");
    VolumeResult { v_m3 }
}

// Inverse of depth_to_volume: 1 m³ over 1 ha is 0.1 mm
pub fn volume_to_depth(v_m3: f64, area_ha: f64) -> f64 {
    v_m3 / hectares_to_m2(area_ha) * MM_PER_M
}
