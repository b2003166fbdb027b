//! Plain data row types written by output backends.

use rsb_sim::{PickupEvent, SessionStats, Vehicle, VehicleStatus};

/// One vehicle's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:        u64,
    pub vehicle_id:  u16,
    pub x:           f32,
    pub y:           f32,
    pub load:        u32,
    pub capacity:    u32,
    pub status:      VehicleStatus,
    /// Stop being driven to; `u32::MAX` when the vehicle has no target.
    pub target_stop: u32,
    /// Distance travelled by this vehicle so far.
    pub distance:    f32,
}

impl VehicleSnapshotRow {
    pub fn from_vehicle(tick: u64, v: &Vehicle) -> Self {
        Self {
            tick,
            vehicle_id:  v.id.0,
            x:           v.pos.x,
            y:           v.pos.y,
            load:        v.load,
            capacity:    v.capacity,
            status:      v.status,
            target_stop: v.target.map_or(u32::MAX, |s| s.0),
            distance:    v.distance,
        }
    }
}

/// Running session totals at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub distance:          f64,
    pub passengers_picked: u64,
    pub stops_visited:     u64,
    pub efficiency:        f64,
}

impl TickSummaryRow {
    pub fn from_stats(tick: u64, stats: &SessionStats) -> Self {
        Self {
            tick,
            distance:          stats.distance,
            passengers_picked: stats.passengers_picked,
            stops_visited:     stats.stops_visited,
            efficiency:        stats.efficiency(),
        }
    }
}

/// One completed stop visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupRow {
    pub tick:        u64,
    pub vehicle_id:  u16,
    pub stop_id:     u32,
    pub boarded:     u32,
    pub left_behind: u32,
    pub load:        u32,
}

impl From<&PickupEvent> for PickupRow {
    fn from(e: &PickupEvent) -> Self {
        Self {
            tick:        e.tick.0,
            vehicle_id:  e.vehicle.0,
            stop_id:     e.stop.0,
            boarded:     e.boarded,
            left_behind: e.left_behind,
            load:        e.load,
        }
    }
}
