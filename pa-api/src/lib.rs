//! PurpleAir API - blocking HTTP client for the PurpleAir sensor network REST API.
//!
//! Covers key validation, single- and multi-sensor reads, and group/member
//! management. Each method validates and encodes its arguments, issues exactly
//! one request with the right key header, and returns either the decoded JSON
//! body or a typed failure. There is no retry, caching, or background state.
//!
//! ```no_run
//! use pa_api::{ApiClient, Credentials, SensorQuery};
//! use pa_core::ClientConfig;
//!
//! # fn main() -> pa_core::PaResult<()> {
//! let client = ApiClient::new(&ClientConfig::default(), Credentials::read_only("MY-READ-KEY")?)?;
//! let result = client.get_sensor_data(131075, &SensorQuery::new().fields(["pm2.5", "humidity"]))?;
//! println!("{}", result.body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod operation;
pub mod params;
pub mod query;
pub mod response;
pub mod transport;

// Re-export key types
pub use client::ApiClient;
pub use credentials::{ApiKey, Credentials};
pub use operation::Operation;
pub use params::{EncodedParams, ParamValue, RequestParams};
pub use query::{BoundingBox, LocationType, MemberQuery, NewMember, SensorQuery, SensorsQuery};
pub use response::{ApiResult, ErrorBody};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
