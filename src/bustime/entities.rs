use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::GeoPoint;

/// Every BusTime payload is wrapped in one of these
#[derive(Deserialize, Debug)]
pub(super) struct Envelope {
    #[serde(rename = "bustime-response")]
    pub response: Value,
}

#[derive(Deserialize, Debug)]
pub(super) struct ServiceMessage {
    pub msg: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "RawStop", into = "RawStop")]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
}

/// Stop as the service sends it
#[derive(Serialize, Deserialize, Debug, Clone)]
struct RawStop {
    stpid: String,
    stpnm: String,
    lat: f64,
    lon: f64,
}

impl From<RawStop> for Stop {
    fn from(raw: RawStop) -> Self {
        Stop {
            id: raw.stpid,
            name: raw.stpnm,
            location: GeoPoint::new(raw.lat, raw.lon),
        }
    }
}

impl From<Stop> for RawStop {
    fn from(stop: Stop) -> Self {
        RawStop {
            stpid: stop.id,
            stpnm: stop.name,
            lat: stop.location.latitude,
            lon: stop.location.longitude,
        }
    }
}

/// Arrival prediction. Only the stop and route are picked out, everything
/// else the service sends is kept as is in `fields`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    #[serde(rename = "stpid")]
    pub stop_id: String,
    #[serde(rename = "rt")]
    pub route: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Prediction {
    /// Minutes until arrival as reported, e.g. `"5"` or `"DUE"`
    pub fn countdown(&self) -> Option<&str> {
        self.fields.get("prdctdn").and_then(Value::as_str)
    }

    pub fn vehicle_id(&self) -> Option<&str> {
        self.fields.get("vid").and_then(Value::as_str)
    }

    pub fn is_delayed(&self) -> bool {
        self.fields.get("dly").and_then(Value::as_bool).unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    #[serde(rename = "rt")]
    pub id: String,
    #[serde(rename = "rtnm")]
    pub name: String,
    #[serde(rename = "rtclr", default)]
    pub color: Option<String>,
}

/// Records passed straight through from the service
pub type Record = Map<String, Value>;

#[derive(Deserialize, Debug)]
pub(super) struct TimeResponse {
    pub tm: String,
}

#[derive(Deserialize, Debug)]
pub(super) struct Direction {
    pub dir: String,
}

#[derive(Deserialize, Debug)]
pub(super) struct DirectionsResponse {
    pub directions: Vec<Direction>,
}

#[derive(Deserialize, Debug)]
pub(super) struct StopsResponse {
    pub stops: Vec<Stop>,
}

#[derive(Deserialize, Debug)]
pub(super) struct PredictionsResponse {
    pub prd: Vec<Prediction>,
}

#[derive(Deserialize, Debug)]
pub(super) struct VehiclesResponse {
    pub vehicle: Vec<Record>,
}

#[derive(Deserialize, Debug)]
pub(super) struct RoutesResponse {
    pub routes: Vec<Route>,
}

#[derive(Deserialize, Debug)]
pub(super) struct PatternsResponse {
    pub ptr: Vec<Record>,
}

#[derive(Deserialize, Debug)]
pub(super) struct BulletinsResponse {
    pub sb: Vec<Record>,
}

#[derive(Deserialize, Debug)]
pub(super) struct DataFeedsResponse {
    pub rtpidatafeeds: Vec<Record>,
}
