//! HTTP interaction layer for the Devlaunch client.
//!
//! Contains the transport seam, the classifying request gateway, and the
//! REST bindings implementing the core API traits.

pub mod endpoints;
pub mod gateway;
pub mod transport;

pub use endpoints::DevlaunchApi;
pub use gateway::RequestGateway;
pub use transport::{HttpTransport, OutboundRequest, RawResponse, Transport, TransportFailure};
