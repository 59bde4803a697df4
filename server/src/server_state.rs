use carpool_data_management::DataManager;

use crate::config::Config;

pub struct ServerState {
    pub data_manager: DataManager,
    pub config: Config,
}

impl ServerState {
    pub fn new(data_manager: DataManager, config: Config) -> Self {
        Self { data_manager, config }
    }
}
