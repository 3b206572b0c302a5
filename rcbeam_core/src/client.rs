//! # Remote Service Client
//!
//! Minimal HTTP adapter for the beam calculation service. Each operation is
//! exactly one request: no retry, no caching.
//!
//! Failures are normalized into [`ServiceError`]; call
//! [`ServiceError::user_message`] for the string to show the user.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::errors::{Operation, ServiceError, ServiceResult};
use crate::params::BeamParameters;
use crate::result::{CalcOutcome, HealthStatus, Is456Result, NnPrediction, ResultKind, ServiceInfo};

/// Client for the calculation service
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    timeout: Option<Duration>,
    http: reqwest::Client,
}

impl Default for ServiceClient {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ServiceClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            http: reqwest::Client::new(),
        }
    }

    /// Get the base URL for the client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    /// Code-based capacity calculation
    pub async fn calculate_is456(&self, params: &BeamParameters) -> ServiceResult<Is456Result> {
        self.post(Operation::CalculateIs456, params).await
    }

    /// Neural-network capacity prediction
    pub async fn predict_nn(&self, params: &BeamParameters) -> ServiceResult<NnPrediction> {
        self.post(Operation::PredictNn, params).await
    }

    /// Run the operation behind `kind` and tag the result with it.
    ///
    /// Takes the bundle by value so the caller hands over a snapshot.
    pub async fn submit(&self, kind: ResultKind, params: BeamParameters) -> ServiceResult<CalcOutcome> {
        match kind {
            ResultKind::Is456 => self.calculate_is456(&params).await.map(CalcOutcome::Is456),
            ResultKind::Nn => self.predict_nn(&params).await.map(CalcOutcome::Nn),
        }
    }

    /// Service liveness and model status
    pub async fn health(&self) -> ServiceResult<HealthStatus> {
        self.get(Operation::Health).await
    }

    /// Service name, version and endpoint listing
    pub async fn service_info(&self) -> ServiceResult<ServiceInfo> {
        self.get(Operation::ServiceInfo).await
    }

    async fn post<T: DeserializeOwned>(&self, operation: Operation, params: &BeamParameters) -> ServiceResult<T> {
        let request = self.http.post(self.url(operation)).json(params);
        self.execute(operation, request).await
    }

    async fn get<T: DeserializeOwned>(&self, operation: Operation) -> ServiceResult<T> {
        let request = self.http.get(self.url(operation));
        self.execute(operation, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> ServiceResult<T> {
        let request = self.with_timeout(request);
        tracing::debug!(%operation, base_url = %self.base_url, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::transport(operation, e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::transport(operation, e.to_string()))?;

        if !status.is_success() {
            let err = ServiceError::rejected(operation, status.as_u16(), extract_detail(&body));
            tracing::warn!(%operation, status = status.as_u16(), error = %err, "service rejected request");
            return Err(err);
        }

        let parsed = serde_json::from_slice(&body).map_err(|e| {
            let err = ServiceError::invalid_response(operation, e.to_string());
            tracing::warn!(%operation, error = %err, "unexpected response body");
            err
        })?;
        tracing::info!(%operation, status = status.as_u16(), "request succeeded");
        Ok(parsed)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn with_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    // Browsers own request timeouts on WASM
    #[cfg(target_arch = "wasm32")]
    fn with_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
    }
}

/// Pull the user-facing message out of an error body.
///
/// Handles `{"detail": "..."}` and the validation form
/// `{"detail": [{"loc": ["body", "fck"], "msg": "..."}]}`.
/// Anything else yields `None` so the caller falls back to a generic message.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items.iter().filter_map(validation_message).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn validation_message(item: &Value) -> Option<String> {
    let msg = item.get("msg")?.as_str()?;
    let location: Vec<String> = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|loc| {
            loc.iter()
                .filter(|part| part.as_str() != Some("body"))
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    if location.is_empty() {
        Some(msg.to_string())
    } else {
        Some(format!("{}: {}", location.join("."), msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn is456_body() -> Value {
        json!({
            "Wu_kN_gross": 120.5,
            "Wu_kN_net": 110.2,
            "Mu_kNm": 45.3,
            "Vu_kN": 60.1,
            "d_mm": 420.5,
            "pt_percent": 1.25,
            "tau_v": 0.85,
            "tau_c": 0.62,
            "tau_c_max": 2.8,
            "mode": "Flexure",
            "warnings": []
        })
    }

    #[test]
    fn test_extract_detail_string() {
        let body = br#"{"detail": "fck must be positive"}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("fck must be positive"));
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = serde_json::to_vec(&json!({
            "detail": [
                {"loc": ["body", "fck"], "msg": "Input should be 20, 25, 30, 35 or 40", "type": "literal_error"},
                {"loc": ["body", "b"], "msg": "Input should be greater than or equal to 150", "type": "greater_than_equal"}
            ]
        }))
        .unwrap();
        assert_eq!(
            extract_detail(&body).as_deref(),
            Some("fck: Input should be 20, 25, 30, 35 or 40; b: Input should be greater than or equal to 150")
        );
    }

    #[test]
    fn test_extract_detail_absent_or_unusable() {
        assert_eq!(extract_detail(b"{}"), None);
        assert_eq!(extract_detail(br#"{"detail": 42}"#), None);
        assert_eq!(extract_detail(br#"{"detail": ""}"#), None);
        assert_eq!(extract_detail(br#"{"detail": []}"#), None);
        assert_eq!(extract_detail(b"Internal Server Error"), None);
    }

    #[test]
    fn test_url_building() {
        let client = ServiceClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(Operation::PredictNn), "http://localhost:8000/api/predict-nn");
    }

    #[tokio::test]
    async fn test_calculate_success_and_default_body() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
        let router = Router::new()
            .route(
                "/api/calculate-is456",
                post(|State(seen): State<Arc<Mutex<Vec<Value>>>>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(is456_body())
                }),
            )
            .with_state(seen.clone());
        let client = ServiceClient::new(spawn_stub(router).await);

        let result = client.calculate_is456(&BeamParameters::default()).await.unwrap();
        assert_eq!(result.Wu_kN_gross, 120.5);
        assert!(result.warnings.is_empty());

        let bodies = seen.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], serde_json::to_value(BeamParameters::default()).unwrap());
        assert_eq!(bodies[0]["fck"], json!(25));
        assert_eq!(bodies[0]["load_type"], json!("Point Load"));
        assert_eq!(bodies[0]["L"].as_f64(), Some(4000.0));
    }

    #[tokio::test]
    async fn test_predict_success_via_submit() {
        let router = Router::new().route(
            "/api/predict-nn",
            post(|| async { Json(json!({"predicted_capacity_kN": 95.333})) }),
        );
        let client = ServiceClient::new(spawn_stub(router).await);

        let outcome = client.submit(ResultKind::Nn, BeamParameters::default()).await.unwrap();
        assert_eq!(outcome.kind(), ResultKind::Nn);
        assert_eq!(
            outcome,
            CalcOutcome::Nn(NnPrediction {
                predicted_capacity_kN: 95.333
            })
        );
    }

    #[tokio::test]
    async fn test_detail_is_surfaced() {
        let router = Router::new().route(
            "/api/calculate-is456",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "fck must be positive"})),
                )
            }),
        );
        let client = ServiceClient::new(spawn_stub(router).await);

        let err = client.calculate_is456(&BeamParameters::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::rejected(Operation::CalculateIs456, 400, Some("fck must be positive".into())));
        assert_eq!(err.user_message(), "fck must be positive");
    }

    #[tokio::test]
    async fn test_fallback_without_detail() {
        let router = Router::new()
            .route("/api/calculate-is456", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route(
                "/api/predict-nn",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))) }),
            );
        let client = ServiceClient::new(spawn_stub(router).await);
        let params = BeamParameters::default();

        let calc = client.calculate_is456(&params).await.unwrap_err();
        assert_eq!(calc.user_message(), "Calculation failed");

        let nn = client.predict_nn(&params).await.unwrap_err();
        assert_eq!(nn.user_message(), "Prediction failed");
        assert_eq!(nn.error_code(), "REJECTED");
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let router = Router::new().route(
            "/api/predict-nn",
            post(|| async { Json(json!({"capacity": 12.0})) }),
        );
        let client = ServiceClient::new(spawn_stub(router).await);

        let err = client.predict_nn(&BeamParameters::default()).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RESPONSE");
        assert_eq!(err.user_message(), "Prediction failed");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ServiceClient::new(format!("http://{}", addr));
        let err = client.calculate_is456(&BeamParameters::default()).await.unwrap_err();
        assert_eq!(err.error_code(), "TRANSPORT");
        assert_eq!(err.user_message(), "Calculation failed");
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_failure() {
        let router = Router::new().route(
            "/api/predict-nn",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"predicted_capacity_kN": 1.0}))
            }),
        );
        let base = spawn_stub(router).await;
        let config = ClientConfig::new(base).with_timeout(Some(Duration::from_millis(100)));
        let client = ServiceClient::from_config(&config);

        let err = client.predict_nn(&BeamParameters::default()).await.unwrap_err();
        assert_eq!(err.error_code(), "TRANSPORT");
        assert_eq!(err.user_message(), "Prediction failed");
    }

    #[tokio::test]
    async fn test_health_and_info() {
        let router = Router::new()
            .route("/health", get(|| async { Json(json!({"status": "healthy", "model_loaded": true})) }))
            .route(
                "/",
                get(|| async {
                    Json(json!({
                        "message": "RC Beam Bearing Capacity API",
                        "version": "1.0.0",
                        "docs": "/docs",
                        "endpoints": {
                            "calculate_is456": "/api/calculate-is456",
                            "predict_nn": "/api/predict-nn"
                        }
                    }))
                }),
            );
        let client = ServiceClient::new(spawn_stub(router).await);

        let health = client.health().await.unwrap();
        assert!(health.is_healthy());
        assert!(health.model_loaded);

        let info = client.service_info().await.unwrap();
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.endpoints["predict_nn"], "/api/predict-nn");
    }
}
