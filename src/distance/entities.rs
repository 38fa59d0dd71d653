use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DistanceMeasurement {
    pub meters: u32,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DurationMeasurement {
    pub seconds: u32,
    pub text: String,
}

/// Walking distance and time to one destination
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub distance: DistanceMeasurement,
    pub duration: DurationMeasurement,
}

#[derive(Deserialize, Debug)]
pub(super) struct MatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Deserialize, Debug)]
pub(super) struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}

#[derive(Deserialize, Debug)]
pub(super) struct MatrixElement {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub distance: Option<MatrixValue>,
    #[serde(default)]
    pub duration: Option<MatrixValue>,
}

#[derive(Deserialize, Debug)]
pub(super) struct MatrixValue {
    pub value: u32,
    pub text: String,
}
