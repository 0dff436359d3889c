use crate::models::{
    Id,
    analytics::{AnalyticsQuery, AnalyticsSummary},
    error::AppError,
    meter::{Meter, NewMeter},
    property::{NewProperty, Property},
    reading::{NewReading, Reading},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// CONSTANTS
const BASE_URL: &str = "/api";

// API CONFIGURATION
/// Configuration for the metering backend client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    token: Option<String>,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Returns the bearer token attached to requests, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Constructs the URL for listing and creating properties.
    pub fn properties_url(&self) -> String {
        format!("{}/properties/", self.base_url)
    }

    /// Constructs the URL for a single property.
    pub fn property_url(&self, id: Id) -> String {
        format!("{}/properties/{id}/", self.base_url)
    }

    /// Constructs the URL for the meters of one property.
    pub fn meters_url(&self, property: Id) -> String {
        format!("{}/meters/?property={property}", self.base_url)
    }

    /// Constructs the URL for creating meters.
    pub fn meters_collection_url(&self) -> String {
        format!("{}/meters/", self.base_url)
    }

    /// Constructs the URL for a single meter.
    pub fn meter_url(&self, id: Id) -> String {
        format!("{}/meters/{id}/", self.base_url)
    }

    /// Constructs the URL for the readings of one property. The filter
    /// traverses the meter relation, hence the double-underscore parameter.
    pub fn readings_url(&self, property: Id) -> String {
        format!("{}/readings/?meter__property={property}", self.base_url)
    }

    /// Constructs the URL for creating readings.
    pub fn readings_collection_url(&self) -> String {
        format!("{}/readings/", self.base_url)
    }

    /// Constructs the full analytics URL for `query`.
    pub fn analytics_url(&self, query: &AnalyticsQuery) -> String {
        let properties = query
            .properties
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let range = &query.range;
        let mut url = format!(
            "{}/analytics/?properties={properties}&start_year={}&start_month={}&end_year={}&end_month={}",
            self.base_url, range.start_year, range.start_month, range.end_year, range.end_month
        );
        if let Some(resource) = query.resource_type {
            url.push_str("&resource_type=");
            url.push_str(resource.code());
        }
        url
    }

    /// Constructs the URL for the next-month cost forecast of one property.
    pub fn forecast_url(&self, property: Id) -> String {
        format!("{}/analytics/forecast/?property={property}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    token: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer token for authenticated endpoints.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.unwrap_or_else(|| BASE_URL.to_string()),
            token: self.token,
        }
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct ForecastResponse {
    #[serde(default)]
    forecast_amount: f64,
}

// METERING CLIENT
/// HTTP client for the metering backend.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Creates a client that authenticates with `token`.
    pub fn with_token(token: impl Into<String>) -> Result<Self, AppError> {
        Self::with_config(ApiConfig::builder().token(token).build())
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetches every property of the signed-in user.
    pub async fn list_properties(&self) -> Result<Vec<Property>, AppError> {
        self.get_json(&self.config.properties_url()).await
    }

    /// Creates a property and returns the stored record.
    pub async fn create_property(&self, property: &NewProperty) -> Result<Property, AppError> {
        self.post_json(&self.config.properties_url(), property).await
    }

    /// Deletes a property along with its meters and readings.
    pub async fn delete_property(&self, id: Id) -> Result<(), AppError> {
        self.delete(&self.config.property_url(id)).await
    }

    /// Fetches the meters installed at one property.
    pub async fn list_meters(&self, property: Id) -> Result<Vec<Meter>, AppError> {
        self.get_json(&self.config.meters_url(property)).await
    }

    /// Registers a meter and returns the stored record.
    pub async fn create_meter(&self, meter: &NewMeter) -> Result<Meter, AppError> {
        self.post_json(&self.config.meters_collection_url(), meter)
            .await
    }

    /// Flips a meter's active flag and returns the updated record.
    pub async fn set_meter_active(&self, id: Id, active: bool) -> Result<Meter, AppError> {
        self.patch_json(
            &self.config.meter_url(id),
            &serde_json::json!({ "is_active": active }),
        )
        .await
    }

    /// Deletes a meter along with its readings.
    pub async fn delete_meter(&self, id: Id) -> Result<(), AppError> {
        self.delete(&self.config.meter_url(id)).await
    }

    /// Fetches all readings across one property's meters.
    pub async fn list_readings(&self, property: Id) -> Result<Vec<Reading>, AppError> {
        self.get_json(&self.config.readings_url(property)).await
    }

    /// Submits a reading and returns the stored record.
    pub async fn create_reading(&self, reading: &NewReading) -> Result<Reading, AppError> {
        self.post_json(&self.config.readings_collection_url(), reading)
            .await
    }

    /// Fetches the aggregated analytics for `query`.
    pub async fn fetch_analytics(&self, query: &AnalyticsQuery) -> Result<AnalyticsSummary, AppError> {
        self.get_json(&self.config.analytics_url(query)).await
    }

    /// Fetches the projected charge for the coming month.
    pub async fn fetch_forecast(&self, property: Id) -> Result<f64, AppError> {
        let response: ForecastResponse = self.get_json(&self.config.forecast_url(property)).await?;
        Ok(response.forecast_amount)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Executes a GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let request = self.authorize(self.http.get(url));
        self.execute(request).await
    }

    /// Executes a POST with a JSON body and decodes the JSON response.
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.http.post(url)).json(body);
        self.execute(request).await
    }

    /// Executes a PATCH with a JSON body and decodes the JSON response.
    async fn patch_json<B, T>(&self, url: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.http.patch(url)).json(body);
        self.execute(request).await
    }

    /// Executes a DELETE, expecting an empty success body.
    async fn delete(&self, url: &str) -> Result<(), AppError> {
        let request = self.authorize(self.http.delete(url));
        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse response: {e}")))
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::ApiError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::ApiError(format!("Request error: {error}"))
        } else {
            AppError::ApiError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = extract_detail(body);
        match status.as_u16() {
            429 => AppError::RateLimited,
            401 | 403 => AppError::AuthError(
                detail.unwrap_or_else(|| format!("Authentication failed: {status}")),
            ),
            404 => AppError::NotFound(detail.unwrap_or_else(|| format!("Resource not found: {status}"))),
            400..=499 => AppError::ApiError(
                detail.unwrap_or_else(|| format!("Client error {status}: {body}")),
            ),
            500..=599 => AppError::ApiError(format!("Server error {status}: {body}")),
            _ => AppError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

/// Pulls the human-readable message out of a backend error body.
///
/// The backend answers either `{"detail": "..."}` or a per-field map such as
/// `{"value": ["Enter a number."]}`; the first message found wins.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
        return Some(detail.to_string());
    }
    let fields = value.as_object()?;
    for messages in fields.values() {
        if let Some(text) = messages.as_str() {
            return Some(text.to_string());
        }
        if let Some(first) = messages
            .as_array()
            .and_then(|list| list.first())
            .and_then(|m| m.as_str())
        {
            return Some(first.to_string());
        }
    }
    None
}

// CONVENIENCE FUNCTIONS
/// Fetches properties with a one-off client.
pub async fn fetch_properties(token: &str) -> Result<Vec<Property>, AppError> {
    ApiClient::with_token(token)?.list_properties().await
}

/// Fetches one property's meters with a one-off client.
pub async fn fetch_meters(token: &str, property: Id) -> Result<Vec<Meter>, AppError> {
    ApiClient::with_token(token)?.list_meters(property).await
}

/// Fetches one property's readings with a one-off client.
pub async fn fetch_readings(token: &str, property: Id) -> Result<Vec<Reading>, AppError> {
    ApiClient::with_token(token)?.list_readings(property).await
}

/// Fetches an analytics aggregation with a one-off client.
pub async fn fetch_analytics(
    token: &str,
    query: &AnalyticsQuery,
) -> Result<AnalyticsSummary, AppError> {
    ApiClient::with_token(token)?.fetch_analytics(query).await
}

/// Fetches the forecast figure with a one-off client.
pub async fn fetch_forecast(token: &str, property: Id) -> Result<f64, AppError> {
    ApiClient::with_token(token)?.fetch_forecast(property).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::MonthRange;
    use crate::models::meter::ResourceType;

    fn query(properties: Vec<Id>, resource: Option<ResourceType>) -> AnalyticsQuery {
        AnalyticsQuery::new(
            properties,
            resource,
            MonthRange {
                start_year: 2025,
                start_month: 3,
                end_year: 2026,
                end_month: 2,
            },
        )
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ApiConfig::builder().build();
        assert_eq!(config.properties_url(), "/api/properties/");
        assert_eq!(config.token(), None);
    }

    #[test]
    fn test_config_builder_custom_base() {
        let config = ApiConfig::builder()
            .base_url("http://localhost:8000/api")
            .build();
        assert_eq!(config.meter_url(7), "http://localhost:8000/api/meters/7/");
    }

    #[test]
    fn test_readings_url_filters_through_meter() {
        let config = ApiConfig::builder().build();
        assert_eq!(config.readings_url(3), "/api/readings/?meter__property=3");
    }

    #[test]
    fn test_analytics_url_construction() {
        let config = ApiConfig::builder().build();
        let url = config.analytics_url(&query(vec![1, 4], Some(ResourceType::Gas)));
        assert!(url.starts_with("/api/analytics/?properties=1,4"));
        assert!(url.contains("start_year=2025"));
        assert!(url.contains("start_month=3"));
        assert!(url.contains("end_year=2026"));
        assert!(url.contains("end_month=2"));
        assert!(url.ends_with("&resource_type=gas"));
    }

    #[test]
    fn test_analytics_url_omits_resource_when_unset() {
        let config = ApiConfig::builder().build();
        let url = config.analytics_url(&query(vec![2], None));
        assert!(!url.contains("resource_type"));
    }

    #[test]
    fn test_forecast_url_construction() {
        let config = ApiConfig::builder().build();
        assert_eq!(
            config.forecast_url(9),
            "/api/analytics/forecast/?property=9"
        );
    }

    #[test]
    fn test_extract_detail_prefers_detail_key() {
        let body = r#"{"detail": "Invalid token"}"#;
        assert_eq!(extract_detail(body), Some("Invalid token".to_string()));
    }

    #[test]
    fn test_extract_detail_reads_field_errors() {
        let body = r#"{"value": ["Ensure this value is greater than 0."]}"#;
        assert_eq!(
            extract_detail(body),
            Some("Ensure this value is greater than 0.".to_string())
        );
    }

    #[test]
    fn test_extract_detail_ignores_non_json() {
        assert_eq!(extract_detail("<html>gateway error</html>"), None);
    }
}
