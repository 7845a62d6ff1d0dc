//! HTTP Transport
//!
//! reqwest implementation of [`LogApi`]. Every request carries a generated
//! `X-Request-Id` header so a failure in the logs can be matched with the
//! service's own access log.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use uuid::Uuid;

use super::dto::{LogUpdate, LogsResponse, NewLogEntry};
use super::error::{ApiError, ApiResult};
use super::LogApi;
use crate::config::ApiConfig;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Mileage service client over HTTP
pub struct HttpLogApi {
    client: Client,
    base_url: String,
}

impl HttpLogApi {
    /// Create a client for the service described by `config`
    ///
    /// No timeout is applied unless `request_timeout_secs` is set.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and turn any non-2xx status into an error
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let request = builder.header(REQUEST_ID_HEADER, &request_id).build()?;

        tracing::debug!(
            request_id = %request_id,
            method = %request.method(),
            url = %request.url(),
            "Sending request"
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(request_id = %request_id, status = status.as_u16(), "Request succeeded");
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                "Mileage service returned an error"
            );
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl LogApi for HttpLogApi {
    async fn fetch_logs(&self) -> ApiResult<LogsResponse> {
        let response = self.execute(self.client.get(self.url("/api/logs"))).await?;
        response.json().await.map_err(ApiError::from_transport)
    }

    async fn create_log(&self, entry: &NewLogEntry) -> ApiResult<()> {
        self.execute(self.client.post(self.url("/api/logs")).json(entry))
            .await?;
        Ok(())
    }

    async fn update_log(&self, index: usize, update: &LogUpdate) -> ApiResult<()> {
        let url = self.url(&format!("/api/logs/{}", index));
        self.execute(self.client.put(url).json(update)).await?;
        Ok(())
    }

    async fn delete_log(&self, index: usize) -> ApiResult<()> {
        let url = self.url(&format!("/api/logs/{}", index));
        self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    async fn fetch_monthly_report(&self) -> ApiResult<Vec<u8>> {
        let response = self
            .execute(self.client.get(self.url("/api/monthly_report")))
            .await?;
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::{header, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    const FAKE_PDF: &[u8] = b"%PDF-1.4 monthly report";

    /// In-memory stand-in for the mileage service
    #[derive(Default)]
    struct FakeService {
        entries: Vec<Value>,
        requests: Vec<String>,
        request_ids: Vec<String>,
    }

    type Shared = Arc<Mutex<FakeService>>;

    fn record(service: &Shared, request: String, headers: &HeaderMap) {
        let mut service = service.lock().unwrap();
        service.requests.push(request);
        if let Some(id) = headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
            service.request_ids.push(id.to_string());
        }
    }

    async fn list_logs(State(service): State<Shared>, headers: HeaderMap) -> Json<Value> {
        record(&service, "GET /api/logs".to_string(), &headers);
        let service = service.lock().unwrap();
        let total: i64 = service
            .entries
            .iter()
            .map(|e| e["Running Km"].as_i64().unwrap_or(0))
            .sum();
        Json(json!({
            "logs": service.entries,
            "monthly_totals": { "2024-05": total },
        }))
    }

    async fn create_log(
        State(service): State<Shared>,
        headers: HeaderMap,
        Json(entry): Json<Value>,
    ) -> StatusCode {
        record(&service, "POST /api/logs".to_string(), &headers);
        service.lock().unwrap().entries.push(entry);
        StatusCode::OK
    }

    async fn update_log(
        State(service): State<Shared>,
        Path(index): Path<usize>,
        headers: HeaderMap,
        Json(update): Json<Value>,
    ) -> StatusCode {
        record(&service, format!("PUT /api/logs/{}", index), &headers);
        let mut service = service.lock().unwrap();
        let Some(entry) = service.entries.get_mut(index) else {
            return StatusCode::NOT_FOUND;
        };
        for key in ["Starting Km", "End Km", "Running Km", "Purpose"] {
            if let Some(value) = update.get(key) {
                entry[key] = value.clone();
            }
        }
        StatusCode::OK
    }

    async fn delete_log(
        State(service): State<Shared>,
        Path(index): Path<usize>,
        headers: HeaderMap,
    ) -> StatusCode {
        record(&service, format!("DELETE /api/logs/{}", index), &headers);
        let mut service = service.lock().unwrap();
        if index < service.entries.len() {
            service.entries.remove(index);
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        }
    }

    async fn monthly_report(State(service): State<Shared>, headers: HeaderMap) -> impl IntoResponse {
        record(&service, "GET /api/monthly_report".to_string(), &headers);
        ([(header::CONTENT_TYPE, "application/pdf")], FAKE_PDF.to_vec())
    }

    async fn spawn_fake_service(service: Shared) -> String {
        let router = Router::new()
            .route("/api/logs", get(list_logs).post(create_log))
            .route("/api/logs/:index", axum::routing::put(update_log).delete(delete_log))
            .route("/api/monthly_report", get(monthly_report))
            .with_state(service);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    fn client_for(base_url: String) -> HttpLogApi {
        HttpLogApi::new(&ApiConfig {
            base_url,
            request_timeout_secs: Some(5),
        })
        .unwrap()
    }

    fn seeded_service() -> Shared {
        Arc::new(Mutex::new(FakeService {
            entries: vec![json!({
                "Date": "2024-05-07",
                "Starting Km": 1200,
                "End Km": 1250,
                "Running Km": 50,
                "Purpose": "Client visit",
            })],
            ..Default::default()
        }))
    }

    #[test]
    fn test_base_url_is_normalized() {
        let api = client_for("http://localhost:3000///".to_string());
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.url("/api/logs"), "http://localhost:3000/api/logs");
    }

    #[tokio::test]
    async fn test_fetch_logs() {
        let service = seeded_service();
        let api = client_for(spawn_fake_service(Arc::clone(&service)).await);

        let response = api.fetch_logs().await.unwrap();

        assert_eq!(response.logs.len(), 1);
        assert_eq!(response.logs[0].date, "2024-05-07");
        assert_eq!(response.logs[0].running_km, 50);
        assert_eq!(response.monthly_totals.iter().next().unwrap().total, 50.0);
    }

    #[tokio::test]
    async fn test_every_request_has_an_id() {
        let service = seeded_service();
        let api = client_for(spawn_fake_service(Arc::clone(&service)).await);

        api.fetch_logs().await.unwrap();
        api.fetch_logs().await.unwrap();

        let service = service.lock().unwrap();
        assert_eq!(service.request_ids.len(), 2);
        assert_ne!(service.request_ids[0], service.request_ids[1]);
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let service = seeded_service();
        let api = client_for(spawn_fake_service(Arc::clone(&service)).await);

        api.create_log(&NewLogEntry::new("2024-05-08", 1250, 1262, "Groceries"))
            .await
            .unwrap();
        let response = api.fetch_logs().await.unwrap();

        assert_eq!(response.logs.len(), 2);
        assert_eq!(response.logs[1].purpose, "Groceries");
        assert_eq!(response.logs[1].running_km, 12);
    }

    #[tokio::test]
    async fn test_update_keeps_date() {
        let service = seeded_service();
        let api = client_for(spawn_fake_service(Arc::clone(&service)).await);

        api.update_log(0, &LogUpdate::new(1200, 1300, "Airport"))
            .await
            .unwrap();
        let entry = &api.fetch_logs().await.unwrap().logs[0];

        assert_eq!(entry.date, "2024-05-07");
        assert_eq!(entry.end_km, 1300);
        assert_eq!(entry.running_km, 100);
        assert_eq!(entry.purpose, "Airport");
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_a_status_error() {
        let service = seeded_service();
        let api = client_for(spawn_fake_service(Arc::clone(&service)).await);

        let err = api.delete_log(7).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(
            service.lock().unwrap().requests,
            vec!["DELETE /api/logs/7".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_monthly_report() {
        let service = seeded_service();
        let api = client_for(spawn_fake_service(Arc::clone(&service)).await);

        let bytes = api.fetch_monthly_report().await.unwrap();

        assert_eq!(bytes, FAKE_PDF);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client_for(format!("http://{}", addr));
        let err = api.fetch_logs().await.unwrap_err();

        assert!(matches!(err, ApiError::Unavailable(_)));
    }
}
