use crate::{
    service::Service,
    storage::{ConnectionStorage, SledStorage, TodoStorage},
    Settings,
};
use std::sync::Arc;

use tracing::{info, instrument};

use super::StartupError;

#[instrument(name = "init_storage", skip_all)]
pub fn init_storage(settings: &Settings) -> Result<Service, StartupError> {
    let sled_storage = Arc::new(SledStorage::new(&settings.storage.sled)?);

    info!(path = ?settings.storage.sled.path, "todo storage opened");

    Ok(Service::new(
        sled_storage.clone() as Arc<dyn TodoStorage>,
        sled_storage as Arc<dyn ConnectionStorage>,
    ))
}
