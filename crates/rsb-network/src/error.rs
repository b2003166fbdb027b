//! Network-subsystem error type.

use thiserror::Error;

use rsb_core::NodeId;

/// Errors produced by `rsb-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("invalid grid configuration: {0}")]
    InvalidGrid(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
