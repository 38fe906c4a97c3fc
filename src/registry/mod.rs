//! RUES API client modules

pub mod client;
pub mod transport;
pub mod types;

pub use client::{ApiSuccess, RuesClient, RuesClientBuilder, Token};
pub use transport::{HttpTransport, RawResponse, RuesTransport, TOKEN_HEADER};
pub use types::{
    BusinessRecord, Establishment, EstablishmentRecord, EstablishmentsResponse, FileRecord,
    FileResponse, SearchQuery, SearchResponse, STANDING_ACTIVE,
};
