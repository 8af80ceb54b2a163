//! Drag gesture domain: distances, thresholds, and spring motion
//!
//! All drag distances are measured in abstract gesture units rather than
//! terminal cells, so the interaction math stays independent of how the
//! terminal maps columns to travel. One cell of horizontal mouse travel
//! counts as 10 units, which puts the activation threshold at six columns
//! and a full reveal at ten.

/// Minimum drag distance (units) for a release to count as "open" rather
/// than snapping back.
pub const ACTIVATION_THRESHOLD: f32 = 60.0;

/// Drag distance (units) at which a surface is fully revealed. The row
/// offset is clamped here; overdragging never moves the row further.
pub const REVEAL_DISTANCE: f32 = 100.0;

/// Scale of revealed surface content at zero drag distance. Grows linearly
/// to 1.0 at `REVEAL_DISTANCE`.
pub const MIN_SURFACE_SCALE: f32 = 0.5;

/// Gesture units per terminal cell of horizontal travel.
pub const UNITS_PER_CELL: f32 = 10.0;

/// Maximum travel (units) for a press-release pair to still count as a tap.
pub const TAP_SLOP: f32 = 8.0;

/// Fraction of the remaining distance to target kept after one spring tick.
/// Smaller values settle faster.
pub const SPRING_RETENTION: f32 = 0.55;

/// Distance (units) below which the spring snaps exactly onto its target.
pub const SPRING_SNAP: f32 = 1.0;

/// Scale factor for surface content at the given drag distance.
///
/// Monotone non-decreasing and clamped to [MIN_SURFACE_SCALE, 1.0]; any
/// distance at or beyond `REVEAL_DISTANCE` yields exactly 1.0.
pub fn surface_scale(distance: f32) -> f32 {
    let t = distance.abs() / REVEAL_DISTANCE;
    (MIN_SURFACE_SCALE + (1.0 - MIN_SURFACE_SCALE) * t).clamp(MIN_SURFACE_SCALE, 1.0)
}

/// Whether a drag of the given distance arms its direction on release.
pub fn past_threshold(distance: f32) -> bool {
    distance.abs() >= ACTIVATION_THRESHOLD
}

/// Convert a column delta from mouse events into gesture units.
pub fn drag_units(col_delta: i32) -> f32 {
    col_delta as f32 * UNITS_PER_CELL
}

/// Convert a signed offset in gesture units to whole terminal cells.
pub fn offset_cells(offset: f32) -> i16 {
    (offset / UNITS_PER_CELL).round() as i16
}

/// Advance a released row one tick toward its target with friction.
///
/// Keeps `SPRING_RETENTION` of the remaining distance each tick and snaps
/// onto the target once within `SPRING_SNAP`, so motion always terminates
/// at exactly the target value.
pub fn spring_step(offset: f32, target: f32) -> f32 {
    let next = target + (offset - target) * SPRING_RETENTION;
    if (next - target).abs() <= SPRING_SNAP {
        target
    } else {
        next
    }
}
