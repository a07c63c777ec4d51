//! Composition of one city's "today"
//!
//! Current conditions, the 1-day forecast and today's astronomy are fetched
//! concurrently. The summary exists only if all three come back; the first
//! miss or failure drops the other in-flight requests.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use crate::models::TodaySummary;
use crate::weather::ProviderClient;
use crate::{Result, WeatherwiseError};

/// Builds [`TodaySummary`] values on top of a [`ProviderClient`]
#[derive(Clone)]
pub struct SummaryAggregator {
    client: ProviderClient,
}

impl SummaryAggregator {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    /// Today's summary for `city`, or `None` if any part is unavailable.
    ///
    /// Not-found, upstream failures and timeouts all collapse into `None`;
    /// the cause is only logged.
    #[instrument(skip(self))]
    pub async fn get_today_summary(&self, city: &str) -> Option<TodaySummary> {
        self.get_today_summary_on(city, Utc::now().date_naive())
            .await
    }

    /// Same as [`Self::get_today_summary`], with `date` as the first guess
    /// at the location's local day.
    pub async fn get_today_summary_on(&self, city: &str, date: NaiveDate) -> Option<TodaySummary> {
        match self.compose(city, date).await {
            Ok(summary) => {
                debug!("Composed today summary for {}", summary.current.city);
                Some(summary)
            }
            Err(WeatherwiseError::NotFound { message }) => {
                info!("Today summary unavailable: {}", message);
                None
            }
            Err(err) => {
                warn!("Today summary unavailable: {}", err);
                None
            }
        }
    }

    async fn compose(&self, city: &str, date: NaiveDate) -> Result<TodaySummary> {
        let current = async {
            required(self.client.fetch_current(city).await, "current conditions")
        };
        let forecast = async {
            required(self.client.fetch_forecast(city, 1).await, "forecast")
                .and_then(|forecast| {
                    forecast
                        .days
                        .into_iter()
                        .next()
                        .ok_or_else(|| WeatherwiseError::not_found("forecast has no days"))
                })
        };
        let astronomy = async {
            required(self.client.fetch_astronomy(city, date).await, "astronomy")
        };

        let (current, today, astronomy) = futures::try_join!(current, forecast, astronomy)?;

        // The forecast's first day is the location's local date. Near UTC
        // midnight the guess can be a day off for far east or west cities.
        let astronomy = if astronomy.date == today.date {
            astronomy
        } else {
            debug!(
                "Astronomy fetched for {} but local day is {}, refetching",
                astronomy.date, today.date
            );
            required(
                self.client.fetch_astronomy(city, today.date).await,
                "astronomy",
            )?
        };

        Ok(TodaySummary::new(current, today, astronomy))
    }
}

/// Turn an empty provider answer into an error so `try_join!` short-circuits
fn required<T>(result: Result<Option<T>>, part: &str) -> Result<T> {
    result?.ok_or_else(|| WeatherwiseError::not_found(format!("no {part} for this location")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use rstest::rstest;

    use super::*;
    use crate::models::summary::fixtures;
    use crate::models::{Conditions, Forecast};
    use crate::weather::fake::{FakeSource, Reply};

    fn source(
        current: Reply<()>,
        forecast: Reply<()>,
        astronomy: Reply<()>,
    ) -> Arc<FakeSource> {
        let summary = fixtures::summary(&Conditions::default(), "06:40 AM");
        let source = FakeSource::default();

        let current_reply = with(current, summary.current.clone());
        let forecast_reply = with(
            forecast,
            Forecast {
                city: "Lisbon".to_string(),
                region: "Lisboa".to_string(),
                country: "Portugal".to_string(),
                days: vec![summary.today.clone()],
            },
        );
        let astronomy_reply = with(astronomy, summary.astronomy.clone());

        source
            .current
            .lock()
            .unwrap()
            .insert("lisbon".to_string(), current_reply);
        source
            .forecast
            .lock()
            .unwrap()
            .insert("lisbon".to_string(), forecast_reply);
        source
            .astronomy
            .lock()
            .unwrap()
            .insert("lisbon".to_string(), astronomy_reply);
        Arc::new(source)
    }

    fn with<T>(shape: Reply<()>, value: T) -> Reply<T> {
        match shape {
            Reply::Found(()) => Reply::Found(value),
            Reply::Missing => Reply::Missing,
            Reply::Fail => Reply::Fail,
        }
    }

    fn aggregator(source: Arc<FakeSource>) -> SummaryAggregator {
        SummaryAggregator::new(ProviderClient::new(source))
    }

    fn local_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_summary_when_all_parts_present() {
        let source = source(Reply::Found(()), Reply::Found(()), Reply::Found(()));
        let summary = aggregator(source.clone())
            .get_today_summary_on("Lisbon", local_day())
            .await
            .unwrap();

        assert_eq!(summary.current.city, "Lisbon");
        assert_eq!(summary.astronomy.sunrise, "06:40 AM");
        assert_eq!(source.current_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.forecast_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.astronomy_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_astronomy_follows_local_day_of_forecast() {
        let source = source(Reply::Found(()), Reply::Found(()), Reply::Found(()));
        let utc_day = local_day().pred_opt().unwrap();

        let summary = aggregator(source.clone())
            .get_today_summary_on("Lisbon", utc_day)
            .await
            .unwrap();

        assert_eq!(summary.astronomy.date, local_day());
        assert_eq!(summary.today.date, local_day());
        assert_eq!(
            *source.astronomy_dates.lock().unwrap(),
            vec![utc_day, local_day()]
        );
    }

    #[rstest]
    #[case::no_current(Reply::Missing, Reply::Found(()), Reply::Found(()))]
    #[case::no_forecast(Reply::Found(()), Reply::Missing, Reply::Found(()))]
    #[case::no_astronomy(Reply::Found(()), Reply::Found(()), Reply::Missing)]
    #[case::current_fails(Reply::Fail, Reply::Found(()), Reply::Found(()))]
    #[case::forecast_fails(Reply::Found(()), Reply::Fail, Reply::Found(()))]
    #[case::astronomy_fails(Reply::Found(()), Reply::Found(()), Reply::Fail)]
    #[case::nothing(Reply::Missing, Reply::Missing, Reply::Missing)]
    #[tokio::test]
    async fn test_any_missing_part_means_no_summary(
        #[case] current: Reply<()>,
        #[case] forecast: Reply<()>,
        #[case] astronomy: Reply<()>,
    ) {
        let source = source(current, forecast, astronomy);
        assert!(aggregator(source).get_today_summary("Lisbon").await.is_none());
    }

    #[tokio::test]
    async fn test_forecast_without_days_means_no_summary() {
        let source = source(Reply::Found(()), Reply::Found(()), Reply::Found(()));
        if let Some(Reply::Found(forecast)) = source.forecast.lock().unwrap().get_mut("lisbon") {
            forecast.days.clear();
        }
        assert!(aggregator(source).get_today_summary("Lisbon").await.is_none());
    }

    #[tokio::test]
    async fn test_partial_failure_caches_only_successful_parts() {
        let source = source(Reply::Found(()), Reply::Found(()), Reply::Missing);
        let aggregator = aggregator(source.clone());

        assert!(aggregator.get_today_summary("Lisbon").await.is_none());
        assert!(aggregator.get_today_summary("Lisbon").await.is_none());

        // Astronomy is never cached; the other parts may or may not have
        // completed before the miss cancelled them, but never more than once each.
        assert_eq!(source.astronomy_calls.load(Ordering::SeqCst), 2);
        assert!(source.current_calls.load(Ordering::SeqCst) <= 2);
    }
}
