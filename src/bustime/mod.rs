//! Client for the BusTime real time transit API
mod client;
mod entities;

pub use client::{
    BulletinQuery, BusTimeClient, PatternSelector, Resolution, TransitApi, VehicleSelector,
    DEFAULT_PREDICTION_LIMIT, MAX_PREDICTION_IDS,
};
pub use entities::{Prediction, Record, Route, Stop};
