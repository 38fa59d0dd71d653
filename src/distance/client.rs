use async_trait::async_trait;
use url::Url;

use super::entities::*;
use crate::config::{Config, DEFAULT_DISTANCE_WINDOW_SIZE};
use crate::error::{Error, RemoteError, RemoteResult, Result};
use crate::geo::{join_points, GeoPoint};
use crate::http::{HttpTransport, Transport};
use crate::window::for_each_window;

#[async_trait]
pub trait DistanceApi: Send + Sync {
    /// One measurement per destination, in the same order
    async fn measure(&self, origin: GeoPoint, destinations: &[GeoPoint])
        -> Result<Vec<Measurement>>;
}

pub struct DistanceMatrixClient<T = HttpTransport> {
    transport: T,
    base: Url,
    key: String,
    window_size: usize,
}

impl DistanceMatrixClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new()?;
        DistanceMatrixClient::new(transport, &config.distance_api_base, &config.distance_api_key)?
            .with_window_size(config.distance_window_size)
    }
}

impl<T: Transport> DistanceMatrixClient<T> {
    pub fn new(transport: T, base: &str, key: &str) -> Result<Self> {
        Ok(DistanceMatrixClient {
            transport,
            base: Url::parse(base)?,
            key: key.to_string(),
            window_size: DEFAULT_DISTANCE_WINDOW_SIZE,
        })
    }

    pub fn with_window_size(mut self, window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::Parameter("Window size must be at least 1".to_string()));
        }
        self.window_size = window_size;
        Ok(self)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    fn url(&self, origin: GeoPoint, destinations: &[GeoPoint]) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("origins", &origin.to_string())
            .append_pair("destinations", &join_points(destinations))
            .append_pair("mode", "walking")
            .append_pair("key", &self.key);
        url
    }

    /// A single request, for no more than one window of destinations
    async fn measure_window(
        &self,
        origin: GeoPoint,
        destinations: &[GeoPoint],
    ) -> RemoteResult<Vec<Measurement>> {
        let body = self.transport.get(self.url(origin, destinations)).await?;
        let response: MatrixResponse = serde_json::from_str(&body)?;

        if response.status != "OK" {
            let message = response.error_message.unwrap_or(response.status);
            log::warn!("Distance matrix request failed: {}", message);
            return Err(RemoteError::Service(message));
        }

        let elements = response
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Malformed("No rows in distance matrix".to_string()))?
            .elements;

        if elements.len() != destinations.len() {
            return Err(RemoteError::Malformed(format!(
                "Asked for {} destinations, got {}",
                destinations.len(),
                elements.len()
            )));
        }

        elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| -> RemoteResult<Measurement> {
                let missing = |field: &str| {
                    RemoteError::Malformed(format!(
                        "Element {} has no {} (status {})",
                        i,
                        field,
                        element.status.as_deref().unwrap_or("missing")
                    ))
                };
                let distance = element.distance.as_ref().ok_or_else(|| missing("distance"))?;
                let duration = element.duration.as_ref().ok_or_else(|| missing("duration"))?;

                Ok(Measurement {
                    distance: DistanceMeasurement {
                        meters: distance.value,
                        text: distance.text.clone(),
                    },
                    duration: DurationMeasurement {
                        seconds: duration.value,
                        text: duration.text.clone(),
                    },
                })
            })
            .collect()
    }
}

#[async_trait]
impl<T: Transport> DistanceApi for DistanceMatrixClient<T> {
    async fn measure(
        &self,
        origin: GeoPoint,
        destinations: &[GeoPoint],
    ) -> Result<Vec<Measurement>> {
        for_each_window(destinations, self.window_size, |window| async move {
            self.measure_window(origin, window).await.map_err(Error::from)
        })
        .await
    }
}
