// HTTP side of restgate: the gateway session and the specification cache

pub mod gateway;
pub mod spec_cache;

pub use gateway::{mocked_outcome, GatewayCall, GatewayClient, InvokeOutcome};
pub use spec_cache::{SpecCache, DEFAULT_SPEC_FILE};
