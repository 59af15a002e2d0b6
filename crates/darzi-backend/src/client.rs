//! # HTTP Backend Client
//!
//! The production [`BackendApi`] implementation over reqwest.
//!
//! ## Endpoint Map
//! ```text
//! POST   /api/bills                create bill (opaque response)
//! GET    /api/bills                list bills (?status=, ?customer_id=)
//! GET    /api/customers            list customers (?search=)
//! GET    /api/customers/stats      aggregate stats
//! GET    /api/customers/{id}       customer detail with bill summaries
//! POST   /api/customers            create customer
//! PUT    /api/customers/{id}       update customer
//! DELETE /api/customers/{id}       delete customer (cascades to bills)
//! GET    /api/settings/upi         payment settings
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use darzi_core::{Bill, Customer, CustomerStats};

use crate::api::{
    BackendApi, BillFilter, BillPayload, BillsEnvelope, CustomerEnvelope, CustomerPayload,
    CustomersEnvelope, DeleteCustomerResponse, UpiSettings,
};
use crate::error::{BackendError, BackendResult};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the shop backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> BackendResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into();
        Ok(HttpBackend {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> BackendResult<T> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put<B: serde::Serialize>(&self, path: &str, body: &B) -> BackendResult<()> {
        debug!(path, "PUT");
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        debug!(path, "DELETE");
        let response = self.client.delete(self.url(path)).send().await?;
        Self::decode(response).await
    }

    /// Maps a non-success status to a typed error, otherwise hands the
    /// response back for body decoding.
    async fn check(response: Response) -> BackendResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => BackendError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                BackendError::Rejected(message)
            }
            _ => BackendError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let response = Self::check(response).await?;
        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn create_bill(&self, payload: &BillPayload) -> BackendResult<Value> {
        self.post("/api/bills", payload).await
    }

    async fn list_bills(&self, filter: Option<&BillFilter>) -> BackendResult<Vec<Bill>> {
        let query = filter.map(BillFilter::to_query).unwrap_or_default();
        let envelope: BillsEnvelope = self.get("/api/bills", &query).await?;
        Ok(envelope.bills)
    }

    async fn list_customers(&self, search: Option<&str>) -> BackendResult<Vec<Customer>> {
        let query = match search {
            Some(term) if !term.is_empty() => vec![("search", term.to_string())],
            _ => Vec::new(),
        };
        let envelope: CustomersEnvelope = self.get("/api/customers", &query).await?;
        Ok(envelope.customers)
    }

    async fn get_customer(&self, id: &str) -> BackendResult<Customer> {
        let envelope: CustomerEnvelope =
            self.get(&format!("/api/customers/{}", id), &[]).await?;
        Ok(envelope.customer)
    }

    async fn get_customer_stats(&self) -> BackendResult<CustomerStats> {
        self.get("/api/customers/stats", &[]).await
    }

    async fn create_customer(&self, payload: &CustomerPayload) -> BackendResult<Customer> {
        let envelope: CustomerEnvelope = self.post("/api/customers", payload).await?;
        Ok(envelope.customer)
    }

    async fn update_customer(&self, id: &str, payload: &CustomerPayload) -> BackendResult<()> {
        self.put(&format!("/api/customers/{}", id), payload).await
    }

    async fn delete_customer(&self, id: &str) -> BackendResult<DeleteCustomerResponse> {
        self.delete(&format!("/api/customers/{}", id)).await
    }

    async fn get_upi_settings(&self) -> BackendResult<UpiSettings> {
        self.get("/api/settings/upi", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let backend = HttpBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.url("/api/bills"), "http://localhost:5000/api/bills");
    }
}
