//! Production [`PolygonApi`] implementation over reqwest.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use pgs_model::{LayerId, RemoteError};

use crate::api::{
    ApiResult, CreatePolygonRequest, LayerRecord, PolygonApi, PolygonRecord,
    UpdatePolygonRequest,
};
use crate::config::RemoteConfig;

/// HTTP client for the polygon backend.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client with the configured timeout.
    pub fn new(config: &RemoteConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        decode(response).await
    }
}

/// Map a non-2xx response to [`RemoteError`], decode the body otherwise.
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(RemoteError::http(status.as_u16(), message));
    }
    response
        .json()
        .await
        .map_err(|e| RemoteError::transport(e.to_string()))
}

#[async_trait]
impl PolygonApi for HttpApi {
    async fn create_polygon(&self, request: CreatePolygonRequest) -> ApiResult<PolygonRecord> {
        self.post_json("/polygon/create", &request).await
    }

    async fn update_polygon(&self, request: UpdatePolygonRequest) -> ApiResult<PolygonRecord> {
        self.post_json("/polygon/update", &request).await
    }

    async fn delete_polygon(&self, id: u64) -> ApiResult<()> {
        // At-least-once with no retry; a failed delete stays pending and
        // is re-issued by the next save cycle.
        let response = self
            .client
            .delete(self.url(&format!("/polygon/delete/{id}")))
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RemoteError::http(status.as_u16(), message));
        }
        Ok(())
    }

    async fn list_polygons(&self) -> ApiResult<Vec<PolygonRecord>> {
        self.get_json("/polygons/").await
    }

    async fn polygons_by_layer(&self, layer_id: LayerId) -> ApiResult<Vec<PolygonRecord>> {
        self.get_json(&format!("/pgs_by_layer/?layer_id={layer_id}"))
            .await
    }

    async fn layer_catalog(&self) -> ApiResult<Vec<LayerRecord>> {
        self.get_json("/layers").await
    }

    async fn read_only_dataset(&self) -> ApiResult<String> {
        let response = self
            .client
            .get(self.url("/public/ro.json"))
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RemoteError::http(status.as_u16(), message));
        }
        response
            .text()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))
    }
}
