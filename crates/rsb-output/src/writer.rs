//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PickupRow, TickSummaryRow, VehicleSnapshotRow};

/// Sink for session output rows.
///
/// Errors are surfaced to the caller here; [`SimOutputObserver`] stores them
/// for retrieval with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_pickup(&mut self, row: &PickupRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
