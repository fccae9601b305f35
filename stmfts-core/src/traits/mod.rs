//! Collaborator traits
//!
//! These traits define the interface between the tracking engine and the
//! bus it reads from and the input layer it reports to.

pub mod sink;
pub mod transport;

pub use sink::InputSink;
pub use transport::EventTransport;
