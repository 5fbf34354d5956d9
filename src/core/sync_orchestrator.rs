use crate::camera_record::CameraRecord;
use crate::clients::directory_client::AccountDirectoryClient;
use crate::core::config_reconciler;
use crate::core::record_aggregator;
use crate::core::relay_command::RelayCommandTemplate;
use crate::errors::SyncError;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Fetch -> aggregate -> apply for one account.
///
/// Stops at the first failing stage; no retries. Returns the records that were
/// written so the caller can report on them.
pub fn sync(
    directory: &dyn AccountDirectoryClient,
    account_id: u64,
    config_path: &Path,
    template: &RelayCommandTemplate,
) -> Result<Vec<CameraRecord>, SyncError> {
    let start_time = Instant::now();
    let records = fetch_records(directory, account_id)?;

    config_reconciler::apply(config_path, &records, template).map_err(SyncError::Apply)?;
    info!(
        "🔄 Synced {} camera(s) for account {} into '{}' in {:?}",
        records.len(),
        account_id,
        config_path.display(),
        start_time.elapsed()
    );
    Ok(records)
}

/// The fetch and aggregate stages on their own, for dry runs.
pub fn fetch_records(
    directory: &dyn AccountDirectoryClient,
    account_id: u64,
) -> Result<Vec<CameraRecord>, SyncError> {
    let raw_body = directory
        .fetch_camera_list_raw(account_id)
        .map_err(|source| SyncError::Fetch { account_id, source })?;
    let records = record_aggregator::aggregate(&raw_body).map_err(SyncError::Aggregate)?;
    debug!("Account {} has {} camera(s)", account_id, records.len());
    Ok(records)
}
