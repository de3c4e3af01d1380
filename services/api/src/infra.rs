use applicant_book::config::StorageConfig;
use applicant_book::error::AppError;
use applicant_book::logic::Logic;
use applicant_book::photo::ProfilePhotoStore;
use applicant_book::storage::JsonAddressBookStorage;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the address book from the configured JSON file.
pub(crate) fn open_logic(
    storage: &StorageConfig,
) -> Result<Logic<JsonAddressBookStorage>, AppError> {
    let logic = Logic::load(
        JsonAddressBookStorage::new(&storage.data_file),
        ProfilePhotoStore::new(&storage.photo_dir),
    )?;
    Ok(logic)
}
