//! RUES client: token acquisition and the query operations
//!
//! The client is constructed through [`RuesClientBuilder`] with an optional
//! bearer token. Operations that require a token refuse immediately with
//! [`RuesError::MissingToken`] before touching the network. Success is an
//! [`ApiSuccess`] envelope carrying the decoded data and the upstream status
//! code; every expected failure is a [`RuesError`] value.

use crate::config::ClientConfig;
use crate::error::{Result, RuesError};
use crate::logging::Logger;
use crate::registration::RegistrationId;
use crate::registry::transport::{HttpTransport, RawResponse, RuesTransport};
use crate::registry::types::{
    EstablishmentsResponse, FileResponse, SearchQuery, SearchResponse,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Success half of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSuccess<T> {
    pub data: T,
    pub status_code: u16,
}

/// An opaque bearer token issued by the RUES token endpoint. No expiry is
/// tracked and no refresh is performed; callers request a new one when the
/// upstream starts rejecting the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
}

pub struct RuesClientBuilder {
    config: ClientConfig,
    token: Option<String>,
    transport: Option<Arc<dyn RuesTransport>>,
    logger: Option<Logger>,
}

impl RuesClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            token: None,
            transport: None,
            logger: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn RuesTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> Result<RuesClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new()?),
        };
        Ok(RuesClient {
            config: self.config,
            token: self.token,
            transport,
            logger: self.logger.unwrap_or_default(),
        })
    }
}

pub struct RuesClient {
    config: ClientConfig,
    token: Option<String>,
    transport: Arc<dyn RuesTransport>,
    logger: Logger,
}

impl RuesClient {
    pub fn new(config: ClientConfig, token: Option<String>) -> Result<Self> {
        Self::builder(config).with_token(token).build()
    }

    pub fn builder(config: ClientConfig) -> RuesClientBuilder {
        RuesClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Requests a bearer token from the upstream token endpoint.
    ///
    /// The token travels in the `tokenRuesAPI` response header; a response
    /// without it is a rejection even when the HTTP status is nominally
    /// success. No retries.
    pub async fn fetch_token(config: &ClientConfig) -> Result<ApiSuccess<Token>> {
        let transport = HttpTransport::new()?;
        Self::fetch_token_with(&transport, config, &Logger::default()).await
    }

    /// Token acquisition over a caller-supplied transport.
    pub async fn fetch_token_with(
        transport: &dyn RuesTransport,
        config: &ClientConfig,
        logger: &Logger,
    ) -> Result<ApiSuccess<Token>> {
        logger.verbose("Requesting token from RUES");
        let raw = transport.request_token(&config.base_url).await?;
        match raw.token_header {
            Some(token) => {
                logger.detail(&format!("Token obtained (length: {} chars)", token.len()));
                Ok(ApiSuccess {
                    data: Token { token },
                    status_code: raw.status,
                })
            }
            None => Err(RuesError::UpstreamRejected {
                status: raw.status,
                body: raw.body,
            }),
        }
    }

    /// Advanced search by registration number, tax id or company name.
    pub async fn search(&self, query: &SearchQuery) -> Result<ApiSuccess<SearchResponse>> {
        let token = self.require_token()?;
        self.logger.verbose("Sending advanced search request");
        let raw = self
            .transport
            .post_search(&self.config.base_url, token, query)
            .await?;
        self.envelope(raw)
    }

    /// Establishments owned by one registration within one chamber.
    pub async fn establishments(
        &self,
        id: &RegistrationId,
    ) -> Result<ApiSuccess<EstablishmentsResponse>> {
        let token = self.require_token()?;
        self.logger.verbose(&format!(
            "Looking up establishments for chamber {} registration {}",
            id.chamber_code, id.registration_number
        ));
        let raw = self
            .transport
            .post_establishments(&self.config.base_url, token, id)
            .await?;
        self.envelope(raw)
    }

    /// Composite lookup: search by tax id, decompose the first record's
    /// registration identifier, then look up its establishments.
    ///
    /// A successful search with no matching record is [`RuesError::NotFound`];
    /// search failures propagate unchanged.
    pub async fn establishments_by_tax_id(
        &self,
        nit: u64,
    ) -> Result<ApiSuccess<EstablishmentsResponse>> {
        let response = self.search(&SearchQuery::TaxId(nit)).await?;
        let registration_id = response
            .data
            .first_registration_id()
            .ok_or_else(|| RuesError::NotFound(format!("No registration found for NIT {}", nit)))?;
        let id = RegistrationId::decompose(registration_id);
        self.establishments(&id).await
    }

    /// Registry file (dossier) by id. Requires no token.
    pub async fn file(&self, id: &str) -> Result<ApiSuccess<FileResponse>> {
        self.logger.verbose(&format!("Fetching registry file {}", id));
        let raw = self.transport.get_file(&self.config.base_url, id).await?;
        self.envelope(raw)
    }

    fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(RuesError::MissingToken)
    }

    /// Shapes a raw exchange into the envelope convention: 2xx decodes into
    /// the typed response, anything else carries the upstream body verbatim.
    fn envelope<T: DeserializeOwned>(&self, raw: RawResponse) -> Result<ApiSuccess<T>> {
        if raw.is_success() {
            let data = serde_json::from_value(raw.body)
                .map_err(|e| RuesError::TransportFailure(format!("Unexpected body shape: {}", e)))?;
            Ok(ApiSuccess {
                data,
                status_code: raw.status,
            })
        } else {
            self.logger
                .detail(&format!("Upstream answered with status {}", raw.status));
            Err(RuesError::UpstreamRejected {
                status: raw.status,
                body: raw.body,
            })
        }
    }
}
