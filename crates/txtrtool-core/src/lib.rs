//! txtrtool core library
//!
//! Types shared by every txtrtool crate: the coarse exit status taxonomy,
//! the data-driven enum/string registry, cooperative cancellation, and
//! tracing setup.

pub mod cancel;
pub mod error;
pub mod logging;
pub mod registry;

pub use cancel::CancelToken;
pub use error::{Failure, Operation, Status, TaskResult};
pub use registry::{Registry, INVALID};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::error::{Failure, Operation, Status, TaskResult};
    pub use crate::registry::Registry;
}
