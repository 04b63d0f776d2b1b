//! Client library for the Fake-It mock endpoint service.
//!
//! Fake-It serves configurable mock HTTP endpoints. This crate wraps its
//! management REST API (list, create, update, delete, toggle) together with
//! the ad-hoc invocation path used to exercise a mock, and carries the
//! domain model and URL handling shared by every front end.
//!
//! # Example
//!
//! ```no_run
//! use fakeit_client::{ApiClient, DEFAULT_API_URL};
//!
//! # async fn demo() -> Result<(), fakeit_client::ApiError> {
//! let client = ApiClient::new(DEFAULT_API_URL);
//! for mock in client.list().await? {
//!     println!("{} {} -> {}", mock.method, mock.path, mock.status_code);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod model;
mod url;

pub use api::{Ack, ApiClient, ApiError, InvokeResponse};
pub use model::{
    format_response_body, parse_request_body, parse_response_body, DraftError, HttpMethod, Mock,
    MockDraft,
};
pub use url::{build_api_url, resolve_mock_base, DEFAULT_API_URL, DEFAULT_MOCK_URL};
