use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ServiceError,
    model::{WeatherRecord, WeatherSubmission},
    provider::WeatherProvider,
    store::RecordStore,
};

/// Validates submissions, enriches them with weather data and stores them.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn RecordStore>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self { provider, store }
    }

    /// Fetch weather for the submission and store the combined record.
    ///
    /// Nothing is stored unless every step succeeds.
    pub async fn submit(&self, submission: WeatherSubmission) -> Result<String, ServiceError> {
        validate(&submission)?;

        let weather_data = self.provider.fetch(&submission.location).await?;

        let record = WeatherRecord {
            id: Uuid::new_v4().to_string(),
            request_date: submission.date,
            location: submission.location,
            notes: submission.notes,
            weather_data,
            created_at: Utc::now(),
        };

        let id = self.store.insert(record);
        info!(%id, stored = self.store.len(), "weather record created");

        Ok(id)
    }

    pub fn lookup(&self, id: &str) -> Result<WeatherRecord, ServiceError> {
        self.store
            .get(id)
            .ok_or_else(|| ServiceError::NotFound("Weather data not found".to_string()))
    }
}

fn validate(submission: &WeatherSubmission) -> Result<(), ServiceError> {
    if submission.location.trim().is_empty() {
        return Err(ServiceError::Validation("Location is required".to_string()));
    }
    if submission.date.trim().is_empty() {
        return Err(ServiceError::Validation("Date is required".to_string()));
    }
    Ok(())
}
