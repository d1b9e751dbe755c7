//! KEYRIX - Consistent-Hashing Cache Router
//!
//! Shards key/value traffic across interchangeable HTTP cache nodes. A
//! consistent-hash ring decides which node owns each key, so membership
//! changes remap only a fraction of the key space.

pub mod metrics;
pub mod node;
pub mod ring;
pub mod router;

pub use metrics::Metrics;
pub use node::Store;
pub use ring::{Ring, RingError};
pub use router::{BackendClient, BackendMap, RouterConfig, RouterState};
