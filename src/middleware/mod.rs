pub mod metrics;
pub mod route;

pub use metrics::*;
pub use route::*;
