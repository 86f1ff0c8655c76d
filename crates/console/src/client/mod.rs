use api_types::{
    ErrorResponse,
    assignment::{AssignRequest, MutationAck, ReturnRequest},
    equipment::{EquipmentInstance, EquipmentStatus, EquipmentType},
    health::Health,
    import::{EquipmentImportStats, ImportResponse, UserImportStats},
    reports::{Movement, StockSummary, UserReport, ValueSummaryRow},
    stock::{StockEntry, StockNew},
    user::User,
};
use reqwest::{
    RequestBuilder, Response, StatusCode, Url,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never completed, or a success body did not decode.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; `message` is the backend `{"error": ...}` when present.
    #[error("{status}: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ClientError {
    /// Server-supplied message, if the backend sent a well-formed error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// File picked for a batch import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|err| AppError::BaseUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(API_KEY_HEADER, &self.api_key)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");
        let mut req = self.http.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let res = req.send().await?;
        decode(res).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let res = self
            .authorized(self.http.post(url))
            .json(body)
            .send()
            .await?;
        decode(res).await
    }

    async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: ImportFile,
    ) -> std::result::Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, file = %file.file_name, size = file.bytes.len(), "POST multipart");
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part("file", part);
        let res = self
            .authorized(self.http.post(url))
            .multipart(form)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn health(&self) -> std::result::Result<Health, ClientError> {
        self.get_json("health", &[]).await
    }

    pub async fn stock_summary(&self) -> std::result::Result<StockSummary, ClientError> {
        self.get_json("reports/stock-summary", &[]).await
    }

    pub async fn value_summary(&self) -> std::result::Result<Vec<ValueSummaryRow>, ClientError> {
        self.get_json("reports/value-summary", &[]).await
    }

    pub async fn movements(
        &self,
        limit: Option<u32>,
    ) -> std::result::Result<Vec<Movement>, ClientError> {
        let query = limit
            .map(|limit| vec![("limit", limit.to_string())])
            .unwrap_or_default();
        self.get_json("reports/movements", &query).await
    }

    pub async fn user_report(&self, user_id: i64) -> std::result::Result<UserReport, ClientError> {
        self.get_json(&format!("reports/user/{user_id}"), &[]).await
    }

    pub async fn stock_list(&self) -> std::result::Result<Vec<StockEntry>, ClientError> {
        self.get_json("stock", &[]).await
    }

    pub async fn stock_create(
        &self,
        payload: &StockNew,
    ) -> std::result::Result<StockEntry, ClientError> {
        self.post_json("stock", payload).await
    }

    pub async fn users_list(&self) -> std::result::Result<Vec<User>, ClientError> {
        self.get_json("users", &[]).await
    }

    pub async fn equipment_types_list(
        &self,
    ) -> std::result::Result<Vec<EquipmentType>, ClientError> {
        self.get_json("equipment-types", &[]).await
    }

    pub async fn equipment_instances_list(
        &self,
        status: Option<EquipmentStatus>,
    ) -> std::result::Result<Vec<EquipmentInstance>, ClientError> {
        let query = status
            .map(|s| vec![("status", s.query_value().to_string())])
            .unwrap_or_default();
        self.get_json("equipment-instances", &query).await
    }

    pub async fn assign(
        &self,
        payload: &AssignRequest,
    ) -> std::result::Result<MutationAck, ClientError> {
        self.post_json("assign", payload).await
    }

    pub async fn return_equipment(
        &self,
        payload: &ReturnRequest,
    ) -> std::result::Result<MutationAck, ClientError> {
        self.post_json("return", payload).await
    }

    pub async fn import_users(
        &self,
        file: ImportFile,
    ) -> std::result::Result<ImportResponse<UserImportStats>, ClientError> {
        self.post_file("import/users", file).await
    }

    pub async fn import_equipment(
        &self,
        file: ImportFile,
    ) -> std::result::Result<ImportResponse<EquipmentImportStats>, ClientError> {
        self.post_file("import/equipment", file).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> std::result::Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return res.json::<T>().await.map_err(|err| {
            tracing::warn!(%status, "undecodable success body: {err}");
            ClientError::Transport(err)
        });
    }

    let message = match res.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
            .ok()
            .map(|err| err.error),
        Err(err) => {
            tracing::debug!("error body read failed: {err}");
            None
        }
    };
    tracing::warn!(%status, ?message, "request rejected");
    Err(ClientError::Api { status, message })
}
