//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`
//! - `pickups.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PickupRow, TickSummaryRow, VehicleSnapshotRow};

/// Writes session output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    pickups:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record([
            "tick", "vehicle_id", "x", "y", "load", "capacity", "status", "target_stop", "distance",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "distance", "passengers_picked", "stops_visited", "efficiency"])?;

        let mut pickups = Writer::from_path(dir.join("pickups.csv"))?;
        pickups.write_record(["tick", "vehicle_id", "stop_id", "boarded", "left_behind", "load"])?;

        Ok(Self { snapshots, summaries, pickups, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let target = if row.target_stop == u32::MAX {
                String::new()
            } else {
                row.target_stop.to_string()
            };
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.vehicle_id.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                row.load.to_string(),
                row.capacity.to_string(),
                row.status.as_str().to_owned(),
                target,
                format!("{:.3}", row.distance),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.distance),
            row.passengers_picked.to_string(),
            row.stops_visited.to_string(),
            format!("{:.4}", row.efficiency),
        ])?;
        Ok(())
    }

    fn write_pickup(&mut self, row: &PickupRow) -> OutputResult<()> {
        self.pickups.write_record(&[
            row.tick.to_string(),
            row.vehicle_id.to_string(),
            row.stop_id.to_string(),
            row.boarded.to_string(),
            row.left_behind.to_string(),
            row.load.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.pickups.flush()?;
        Ok(())
    }
}
