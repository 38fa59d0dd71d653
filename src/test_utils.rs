use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::bustime::BusTimeClient;
use crate::config::DEFAULT_BUSTIME_API_BASE;
use crate::distance::DistanceMatrixClient;
use crate::error::{RemoteError, RemoteResult};
use crate::http::Transport;

pub fn init() {
    dotenvy::from_filename(".dev.vars").ok();
    env_logger::builder().is_test(true).try_init().ok();
}

pub fn bustime(transport: MockTransport) -> BusTimeClient<MockTransport> {
    init();
    BusTimeClient::new(transport, DEFAULT_BUSTIME_API_BASE, "NOKEY").unwrap()
}

pub fn distance(transport: MockTransport) -> DistanceMatrixClient<MockTransport> {
    init();
    DistanceMatrixClient::new(transport, "http://localhost/distancematrix", "NOKEY").unwrap()
}

type Handler = Arc<dyn Fn(&Url) -> String + Send + Sync>;

/// Answers requests with canned JSON, picked by the last path segment of the
/// URL, and remembers every URL it was asked for.
#[derive(Clone)]
pub struct MockTransport {
    handlers: HashMap<String, Handler>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        let mut transport = MockTransport {
            handlers: HashMap::new(),
            requests: Arc::default(),
        };

        for (method, body) in fixtures() {
            transport = transport.with(method, &body.to_string());
        }
        transport
            .handlers
            .insert("distancematrix".to_string(), Arc::new(distance_matrix));
        transport
    }

    pub fn with(mut self, method: &str, body: &str) -> Self {
        let body = body.to_string();
        self.handlers
            .insert(method.to_string(), Arc::new(move |_: &Url| body.clone()));
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: Url) -> RemoteResult<String> {
        assert!(url.query_pairs().any(|(k, _)| k == "key"), "No key in {}", url);
        self.requests.lock().unwrap().push(url.clone());

        let method = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        match self.handlers.get(&method) {
            Some(handler) => Ok(handler(&url)),
            None => Err(RemoteError::Status(404, format!("No fixture for {}", method))),
        }
    }
}

/// Destinations are at `n` degrees latitude, `n * 100` metres and
/// `n * 150` seconds away
fn distance_matrix(url: &Url) -> String {
    let destinations = url
        .query_pairs()
        .find(|(k, _)| k == "destinations")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default();

    let elements: Vec<_> = destinations
        .split('|')
        .map(|point| {
            let lat: f64 = point.split(',').next().unwrap().parse().unwrap();
            let meters = (lat * 100.0).round() as u32;
            let seconds = meters * 3 / 2;
            json!({
                "status": "OK",
                "distance": {"value": meters, "text": format!("{} m", meters)},
                "duration": {"value": seconds, "text": format!("{} secs", seconds)},
            })
        })
        .collect();
    let addresses = vec!["destination"; elements.len()];

    json!({
        "status": "OK",
        "origin_addresses": ["origin"],
        "destination_addresses": addresses,
        "rows": [{"elements": elements}],
    })
    .to_string()
}

fn fixtures() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        (
            "gettime",
            json!({"bustime-response": {"tm": "20141012 10:21:04"}}),
        ),
        (
            "getdirections",
            json!({"bustime-response": {"directions": [{"dir": "INBOUND"}, {"dir": "OUTBOUND"}]}}),
        ),
        (
            "getstops",
            json!({"bustime-response": {"stops": [{
                "stpid": "2564",
                "stpnm": "5th Ave  at Meyran Ave",
                "lon": -79.959239533731,
                "lat": 40.441172012068
            }]}}),
        ),
        (
            "getpredictions",
            json!({"bustime-response": {"prd": [{
                "tmstmp": "20141012 10:21",
                "typ": "A",
                "stpnm": "5th Ave  at Meyran Ave",
                "stpid": "2564",
                "vid": "5678",
                "dstp": 4513,
                "rt": "71C",
                "rtdir": "INBOUND",
                "des": "Downtown",
                "prdtm": "20141012 10:30",
                "tablockid": "071C-164",
                "tatripid": "56392",
                "dly": false,
                "prdctdn": "9",
                "zone": ""
            }]}}),
        ),
        (
            "getvehicles",
            json!({"bustime-response": {"vehicle": [{
                "vid": "5678",
                "tmstmp": "20141012 10:21",
                "lat": "40.44",
                "lon": "-79.95",
                "hdg": "90",
                "pid": 1473,
                "rt": "71C",
                "des": "Downtown",
                "pdist": 1200,
                "dly": false
            }]}}),
        ),
        (
            "getroutes",
            json!({"bustime-response": {"routes": [
                {"rt": "71C", "rtnm": "POINT BREEZE", "rtclr": "#cc00cc"},
                {"rt": "61A", "rtnm": "NORTH BRADDOCK"}
            ]}}),
        ),
        (
            "getpatterns",
            json!({"bustime-response": {"ptr": [{
                "pid": 1473,
                "ln": 30256.0,
                "rtdir": "INBOUND",
                "pt": []
            }]}}),
        ),
        (
            "getservicebulletins",
            json!({"bustime-response": {"sb": [{
                "nm": "Detour",
                "sbj": "Forbes Ave closed",
                "prty": "High"
            }]}}),
        ),
        (
            "getrtpidatafeeds",
            json!({"bustime-response": {"rtpidatafeeds": [{
                "name": "Port Authority Bus",
                "source": "Port Authority",
                "displayname": "PAT"
            }]}}),
        ),
    ]
}
