use crate::bustime::{Prediction, Stop, TransitApi, DEFAULT_PREDICTION_LIMIT, MAX_PREDICTION_IDS};
use crate::distance::{DistanceApi, Measurement};
use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::window::for_each_window;

pub const DEFAULT_DISTANCE_METRES: u32 = 400;

/// How far away a stop can be and still count as nearby
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Walking distance in metres
    Distance(u32),
    /// Walking time in seconds
    Duration(u32),
}

impl Default for Reach {
    fn default() -> Self {
        Reach::Distance(DEFAULT_DISTANCE_METRES)
    }
}

impl Reach {
    /// A duration, when there is one, wins over the distance. The distance
    /// is not checked at all in that case.
    pub fn from_thresholds(distance_metres: u32, duration_seconds: Option<u32>) -> Self {
        match duration_seconds {
            Some(seconds) => Reach::Duration(seconds),
            None => Reach::Distance(distance_metres),
        }
    }

    pub fn contains(&self, measurement: &Measurement) -> bool {
        match *self {
            Reach::Distance(metres) => measurement.distance.meters <= metres,
            Reach::Duration(seconds) => measurement.duration.seconds <= seconds,
        }
    }
}

/// A stop along with how far it is from the rider
#[derive(Debug, Clone)]
struct StopDistance {
    measurement: Measurement,
    stop: Stop,
}

/// Finds the stops on a route within walking range, and what's arriving at
/// them. Both clients are borrowed from the caller.
pub struct StopLocator<'a, T: ?Sized, D: ?Sized> {
    transit: &'a T,
    distance: &'a D,
}

impl<'a, T, D> StopLocator<'a, T, D>
where
    T: TransitApi + ?Sized,
    D: DistanceApi + ?Sized,
{
    pub fn new(transit: &'a T, distance: &'a D) -> Self {
        StopLocator { transit, distance }
    }

    async fn stop_distances(
        &self,
        stops: Vec<Stop>,
        location: GeoPoint,
    ) -> Result<Vec<StopDistance>> {
        let points: Vec<GeoPoint> = stops.iter().map(|s| s.location).collect();
        let measurements = self.distance.measure(location, &points).await?;

        // Zipping anything but equal lengths would pin distances on the wrong stops
        if measurements.len() != stops.len() {
            return Err(Error::MeasurementMismatch {
                stops: stops.len(),
                measurements: measurements.len(),
            });
        }

        Ok(measurements
            .into_iter()
            .zip(stops)
            .map(|(measurement, stop)| StopDistance { measurement, stop })
            .collect())
    }

    /// Stops on the route, in route order, that are within `reach` of `location`
    pub async fn stops_in_range(
        &self,
        route: &str,
        direction: &str,
        location: GeoPoint,
        reach: Reach,
    ) -> Result<Vec<Stop>> {
        let stops = self.transit.list_stops(route, direction).await?;
        let total = stops.len();

        let in_range: Vec<Stop> = self
            .stop_distances(stops, location)
            .await?
            .into_iter()
            .filter(|sd| reach.contains(&sd.measurement))
            .map(|sd| sd.stop)
            .collect();

        log::debug!(
            "{} of {} stops on {} {} within {:?}",
            in_range.len(),
            total,
            route,
            direction,
            reach
        );
        Ok(in_range)
    }

    /// Predictions for every stop in range, a batch of stops at a time.
    ///
    /// Results come back batch by batch in stop order, each batch in the
    /// order the service returned it. If any batch fails the whole lot does.
    ///
    /// Only `route` narrows the predictions; `direction` picks the stops but
    /// isn't sent with the prediction requests.
    pub async fn next_arrivals(
        &self,
        route: &str,
        direction: &str,
        location: GeoPoint,
        reach: Reach,
        prediction_limit: u32,
    ) -> Result<Vec<Prediction>> {
        let stop_ids: Vec<String> = self
            .stops_in_range(route, direction, location, reach)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let routes = [route.to_string()];
        for_each_window(&stop_ids, MAX_PREDICTION_IDS, |batch| {
            self.transit.get_predictions(batch, Some(&routes[..]), prediction_limit)
        })
        .await
    }

    /// [`Self::next_arrivals`] with the default reach and prediction limit
    pub async fn next_arrivals_near(
        &self,
        route: &str,
        direction: &str,
        location: GeoPoint,
    ) -> Result<Vec<Prediction>> {
        self.next_arrivals(route, direction, location, Reach::default(), DEFAULT_PREDICTION_LIMIT)
            .await
    }
}
