//! HTTP middleware components.

pub mod access;
pub mod logging;
pub mod metrics;
pub mod security_headers;
pub mod session;
pub mod trace_id;

pub use access::route_guard;
pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{session_context, SessionIdentity};
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
