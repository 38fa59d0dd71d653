use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use url::Url;

use super::entities::*;
use crate::config::Config;
use crate::error::{Error, RemoteError, Result};
use crate::http::{HttpTransport, Transport};

/// Most stop ids the service accepts in one prediction request
pub const MAX_PREDICTION_IDS: usize = 10;
pub const DEFAULT_PREDICTION_LIMIT: u32 = 10;

const TIME_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// The parts of the transit service the stop locator depends on
#[async_trait]
pub trait TransitApi: Send + Sync {
    async fn list_stops(&self, route: &str, direction: &str) -> Result<Vec<Stop>>;

    async fn get_predictions(
        &self,
        stop_ids: &[String],
        routes: Option<&[String]>,
        max_results: u32,
    ) -> Result<Vec<Prediction>>;
}

#[derive(Debug, Clone)]
pub enum VehicleSelector {
    Ids(Vec<String>),
    Routes(Vec<String>),
}

#[derive(Debug, Clone)]
pub enum PatternSelector {
    Ids(Vec<String>),
    Routes(Vec<String>),
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Resolution {
    #[default]
    Seconds,
    Minutes,
}

impl Resolution {
    fn code(self) -> &'static str {
        match self {
            Resolution::Seconds => "S",
            Resolution::Minutes => "M",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BulletinQuery {
    pub routes: Vec<String>,
    pub stops: Vec<String>,
    pub direction: Option<String>,
}

pub struct BusTimeClient<T = HttpTransport> {
    transport: T,
    base: Url,
    key: String,
}

impl BusTimeClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new()?;
        BusTimeClient::new(transport, &config.bustime_api_base, &config.bustime_api_key)
    }
}

impl<T: Transport> BusTimeClient<T> {
    pub fn new(transport: T, base: &str, key: &str) -> Result<Self> {
        // join() drops the last path segment unless there's a trailing slash
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };

        Ok(BusTimeClient {
            transport,
            base,
            key: key.to_string(),
        })
    }

    pub fn url(&self, method: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base.join(method)?;
        url.query_pairs_mut()
            .append_pair("key", &self.key)
            .append_pair("format", "json")
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    async fn request<R>(&self, method: &str, params: &[(&str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(method, params)?;
        let body = self.transport.get(url).await?;

        let Envelope { response } = serde_json::from_str(&body)?;

        if let Some(errors) = response.get("error") {
            let errors: Vec<ServiceMessage> = serde_json::from_value(errors.clone())?;
            let message = errors
                .into_iter()
                .next()
                .map(|e| e.msg)
                .unwrap_or_else(|| "Unknown error".to_string());
            log::warn!("{} failed: {}", method, message);
            return Err(RemoteError::Service(message).into());
        }

        Ok(serde_json::from_value(response)?)
    }

    /// The server's local time
    pub async fn get_time(&self) -> Result<NaiveDateTime> {
        let TimeResponse { tm } = self.request("gettime", &[]).await?;
        NaiveDateTime::parse_from_str(&tm, TIME_FORMAT)
            .map_err(|e| RemoteError::Malformed(format!("Bad time {}: {}", tm, e)).into())
    }

    /// Directions a route runs in, usually `INBOUND` and `OUTBOUND`
    pub async fn list_directions(&self, route: &str) -> Result<BTreeSet<String>> {
        let DirectionsResponse { directions } = self
            .request("getdirections", &[("rt", route.to_string())])
            .await?;
        Ok(directions.into_iter().map(|d| d.dir).collect())
    }

    pub async fn list_stops(&self, route: &str, direction: &str) -> Result<Vec<Stop>> {
        let params = [("rt", route.to_string()), ("dir", direction.to_string())];
        let StopsResponse { stops } = self.request("getstops", &params).await?;
        Ok(stops)
    }

    /// Predictions for up to [`MAX_PREDICTION_IDS`] stops. Callers with more
    /// stops than that need to split them up.
    pub async fn get_predictions(
        &self,
        stop_ids: &[String],
        routes: Option<&[String]>,
        max_results: u32,
    ) -> Result<Vec<Prediction>> {
        if stop_ids.is_empty() {
            return Err(Error::Parameter("At least one stop id is required".to_string()));
        }
        if stop_ids.len() > MAX_PREDICTION_IDS {
            return Err(Error::Parameter(format!(
                "At most {} stop ids per request, got {}",
                MAX_PREDICTION_IDS,
                stop_ids.len()
            )));
        }

        let mut params = vec![
            ("stpid", stop_ids.iter().join(",")),
            ("top", max_results.to_string()),
        ];
        if let Some(routes) = routes.filter(|r| !r.is_empty()) {
            params.push(("rt", routes.iter().join(",")));
        }

        let PredictionsResponse { prd } = self.request("getpredictions", &params).await?;
        Ok(prd)
    }

    pub async fn get_vehicles(
        &self,
        selector: &VehicleSelector,
        resolution: Resolution,
    ) -> Result<Vec<Record>> {
        let mut params = match selector {
            VehicleSelector::Ids(ids) if !ids.is_empty() => vec![("vid", ids.iter().join(","))],
            VehicleSelector::Routes(routes) if !routes.is_empty() => {
                vec![("rt", routes.iter().join(","))]
            }
            _ => return Err(Error::Parameter("Vehicles or routes are required".to_string())),
        };
        params.push(("resolution", resolution.code().to_string()));

        let VehiclesResponse { vehicle } = self.request("getvehicles", &params).await?;
        Ok(vehicle)
    }

    pub async fn get_routes(&self, feed: Option<&str>) -> Result<Vec<Route>> {
        let params = match feed {
            Some(feed) => vec![("rtpidatafeed", feed.to_string())],
            None => vec![],
        };
        let RoutesResponse { routes } = self.request("getroutes", &params).await?;
        Ok(routes)
    }

    pub async fn get_patterns(&self, selector: &PatternSelector) -> Result<Vec<Record>> {
        let params = match selector {
            PatternSelector::Ids(ids) if !ids.is_empty() => vec![("pid", ids.iter().join(","))],
            PatternSelector::Routes(routes) if !routes.is_empty() => {
                vec![("rt", routes.iter().join(","))]
            }
            _ => return Err(Error::Parameter("Pattern ids or routes are required".to_string())),
        };

        let PatternsResponse { ptr } = self.request("getpatterns", &params).await?;
        Ok(ptr)
    }

    pub async fn get_service_bulletins(&self, query: &BulletinQuery) -> Result<Vec<Record>> {
        if query.routes.is_empty() && query.stops.is_empty() {
            return Err(Error::Parameter("Routes and/or stops are required".to_string()));
        }

        let mut params = vec![];
        if !query.routes.is_empty() {
            params.push(("rt", query.routes.iter().join(",")));
        }
        if !query.stops.is_empty() {
            params.push(("stpid", query.stops.iter().join(",")));
        }
        if let Some(direction) = &query.direction {
            params.push(("rtdir", direction.clone()));
        }

        let BulletinsResponse { sb } = self.request("getservicebulletins", &params).await?;
        Ok(sb)
    }

    pub async fn get_rtpi_data_feeds(&self) -> Result<Vec<Record>> {
        let DataFeedsResponse { rtpidatafeeds } = self.request("getrtpidatafeeds", &[]).await?;
        Ok(rtpidatafeeds)
    }
}

#[async_trait]
impl<T: Transport> TransitApi for BusTimeClient<T> {
    async fn list_stops(&self, route: &str, direction: &str) -> Result<Vec<Stop>> {
        BusTimeClient::list_stops(self, route, direction).await
    }

    async fn get_predictions(
        &self,
        stop_ids: &[String],
        routes: Option<&[String]>,
        max_results: u32,
    ) -> Result<Vec<Prediction>> {
        BusTimeClient::get_predictions(self, stop_ids, routes, max_results).await
    }
}
