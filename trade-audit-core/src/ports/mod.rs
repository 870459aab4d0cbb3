pub mod connector;

pub use connector::{ConnectionProvider, Connector};
