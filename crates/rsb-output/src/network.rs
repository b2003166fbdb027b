//! JSON export of a road network and its stops for external viewers.
//!
//! Layout:
//!
//! ```text
//! {
//!   "nodes": [{ "node_id", "x", "y" }, …],
//!   "roads": [{ "from_node", "to_node", "length" }, …],   // each road once
//!   "stops": [{ "stop_id", "x", "y", "node_id", "passengers" }, …]
//! }
//! ```

use std::fs;
use std::path::Path;

use rsb_network::RoadNetwork;
use rsb_sim::Stop;
use serde_json::{Value, json};

use crate::OutputResult;

/// Build the JSON document for `network` and `stops`.
pub fn network_json(network: &RoadNetwork, stops: &[Stop]) -> Value {
    let nodes: Vec<Value> = network
        .node_pos
        .iter()
        .enumerate()
        .map(|(i, pos)| json!({ "node_id": i, "x": pos.x, "y": pos.y }))
        .collect();

    let roads: Vec<Value> = network
        .roads()
        .map(|(a, b, length)| json!({ "from_node": a.0, "to_node": b.0, "length": length }))
        .collect();

    let stops: Vec<Value> = stops
        .iter()
        .map(|s| {
            json!({
                "stop_id":    s.id.0,
                "x":          s.pos.x,
                "y":          s.pos.y,
                "node_id":    s.node.0,
                "passengers": s.initial_passengers,
            })
        })
        .collect();

    json!({ "nodes": nodes, "roads": roads, "stops": stops })
}

/// Write [`network_json`] to `path` as pretty-printed JSON, creating parent
/// directories as needed.
pub fn export_network_json(network: &RoadNetwork, stops: &[Stop], path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(&network_json(network, stops))?;
    fs::write(path, text)?;
    Ok(())
}
