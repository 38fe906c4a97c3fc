//! Transport layer for the RUES API
//!
//! [`RuesTransport`] is the seam between the client and the wire: it exposes
//! the four raw HTTP exchanges the API offers and nothing else, so tests can
//! substitute a scripted transport. [`HttpTransport`] is the reqwest-backed
//! implementation used in production.

use crate::error::{Result, RuesError};
use crate::registration::RegistrationId;
use crate::registry::types::SearchQuery;
use async_trait::async_trait;
use url::Url;

/// Name of the response header carrying the bearer token.
pub const TOKEN_HEADER: &str = "tokenRuesAPI";

const TOKEN_PATH: &str = "/WEB2/api/Token/ObtenerToken";
const SEARCH_PATH: &str = "/api/ConsultasRUES/BusquedaAvanzadaRM";
const ESTABLISHMENTS_PATH: &str = "/api/PropietarioEstXCamaraYMatricula";
const FILE_PATH: &str = "/WEB2/api/Expediente/DetalleRM";

/// One upstream exchange, decoded as far as the transport goes: status code,
/// the token header when present, and the JSON body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub token_header: Option<String>,
    pub body: serde_json::Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Raw HTTP operations against the RUES API.
#[async_trait]
pub trait RuesTransport: Send + Sync {
    /// POST to the token endpoint. The token travels in a response header.
    async fn request_token(&self, base_url: &Url) -> Result<RawResponse>;

    /// POST a search query as a JSON body, with bearer auth.
    async fn post_search(
        &self,
        base_url: &Url,
        token: &str,
        query: &SearchQuery,
    ) -> Result<RawResponse>;

    /// POST an establishments lookup; chamber code and registration number
    /// travel as query parameters, not in the body.
    async fn post_establishments(
        &self,
        base_url: &Url,
        token: &str,
        id: &RegistrationId,
    ) -> Result<RawResponse>;

    /// GET a registry file by path-embedded id. No auth.
    async fn get_file(&self, base_url: &Url, file_id: &str) -> Result<RawResponse>;
}

/// reqwest-backed transport, one shared connection pool per instance.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RuesError::TransportFailure(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Decodes status, token header and JSON body out of a response.
    /// A body that is not JSON is a transport failure, matching the envelope
    /// convention (no status code survives a decode error).
    async fn decode(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let token_header = response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RuesError::TransportFailure(format!("Failed to decode body: {}", e)))?;
        Ok(RawResponse {
            status,
            token_header,
            body,
        })
    }

    fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
        base_url
            .join(path)
            .map_err(|e| RuesError::Config(format!("Invalid endpoint path '{}': {}", path, e)))
    }
}

#[async_trait]
impl RuesTransport for HttpTransport {
    async fn request_token(&self, base_url: &Url) -> Result<RawResponse> {
        let url = Self::endpoint(base_url, TOKEN_PATH)?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| RuesError::TransportFailure(format!("Token request failed: {}", e)))?;
        Self::decode(response).await
    }

    async fn post_search(
        &self,
        base_url: &Url,
        token: &str,
        query: &SearchQuery,
    ) -> Result<RawResponse> {
        let url = Self::endpoint(base_url, SEARCH_PATH)?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(query)
            .send()
            .await
            .map_err(|e| RuesError::TransportFailure(format!("Search request failed: {}", e)))?;
        Self::decode(response).await
    }

    async fn post_establishments(
        &self,
        base_url: &Url,
        token: &str,
        id: &RegistrationId,
    ) -> Result<RawResponse> {
        let url = Self::endpoint(base_url, ESTABLISHMENTS_PATH)?;
        let response = self
            .client
            .post(url)
            .query(&[
                ("codigo_camara", id.chamber_code.as_str()),
                ("matricula", id.registration_number.as_str()),
            ])
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                RuesError::TransportFailure(format!("Establishments request failed: {}", e))
            })?;
        Self::decode(response).await
    }

    async fn get_file(&self, base_url: &Url, file_id: &str) -> Result<RawResponse> {
        let url = Self::endpoint(base_url, &format!("{}/{}", FILE_PATH, file_id))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RuesError::TransportFailure(format!("File request failed: {}", e)))?;
        Self::decode(response).await
    }
}
