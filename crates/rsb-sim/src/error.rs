use rsb_core::{CoreError, VehicleId};
use rsb_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("a simulation needs at least one vehicle")]
    NoVehicles,

    #[error("vehicle {0} does not exist")]
    UnknownVehicle(VehicleId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
