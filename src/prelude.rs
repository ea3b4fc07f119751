pub use std::result::Result as StdResult;
pub use std::sync::Arc;
pub use std::time::{Duration as StdDuration, Instant};

pub use anyhow::{anyhow, Context};
pub use tracing::{debug, error, info, instrument, warn};

pub type Result<T = (), E = anyhow::Error> = StdResult<T, E>;
