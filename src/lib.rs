//! Finds the stops on a bus route within walking distance of a rider, and the
//! next arrivals at them, using the BusTime API for stops and predictions and
//! a distance matrix API for walking distances.

pub mod bustime;
pub mod config;
pub mod distance;
pub mod error;
pub mod geo;
pub mod http;
pub mod stops;
pub mod window;

#[cfg(test)]
mod test_utils;

pub use bustime::{BusTimeClient, Prediction, Stop, TransitApi};
pub use config::Config;
pub use distance::{DistanceApi, DistanceMatrixClient, Measurement};
pub use error::{Error, RemoteError, Result};
pub use geo::GeoPoint;
pub use stops::{Reach, StopLocator};
