//! RUES Client Library
//!
//! Async client for the RUES business registry API (Registro Único
//! Empresarial y Social): token acquisition, advanced business-record
//! search, establishment lookup and registry-file retrieval, plus a
//! disk-backed convenience path for repeated establishment lookups.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod registration;
pub mod registry;

pub use cache::EstablishmentCache;
pub use config::ClientConfig;
pub use error::{Result, RuesError};
pub use logging::Logger;
pub use registration::RegistrationId;
pub use registry::{
    ApiSuccess, Establishment, EstablishmentsResponse, FileResponse, RuesClient,
    RuesClientBuilder, SearchQuery, SearchResponse, Token,
};
