//! Client for the walking distance matrix API
mod client;
mod entities;

pub use client::{DistanceApi, DistanceMatrixClient};
pub use entities::{DistanceMeasurement, DurationMeasurement, Measurement};
