pub mod record_aggregator;
pub mod relay_command;
pub mod config_reconciler;
pub mod sync_orchestrator;

pub use config_reconciler::{apply, reconcile, ConfigDocument, StreamEntry};
pub use record_aggregator::aggregate;
pub use relay_command::RelayCommandTemplate;
pub use sync_orchestrator::sync;
