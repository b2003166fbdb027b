//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use rsb_core::Tick;
use rsb_sim::{PickupEvent, SessionStats, SimObserver, Stop, StopReason, Vehicle};

use crate::row::{PickupRow, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle snapshots, tick summaries and
/// pickups to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  The writer is finished when the session
/// pauses.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_pickup(&mut self, event: &PickupEvent) {
        let result = self.writer.write_pickup(&PickupRow::from(event));
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &SessionStats) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from_stats(tick.0, stats));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &[Vehicle], _stops: &[Stop]) {
        let rows: Vec<VehicleSnapshotRow> = vehicles
            .iter()
            .map(|v| VehicleSnapshotRow::from_vehicle(tick.0, v))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_vehicle_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_pause(&mut self, _tick: Tick, _reason: StopReason, _stats: &SessionStats) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
