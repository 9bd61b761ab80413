mod config;
pub mod paths;

pub use config::{
    Config, EngineSettings, SyncConfig, SyncMapping, load_config, validate_config,
};
pub use paths::{
    CONFIG_FILE_NAME, DEFAULT_TEST_RESOURCES, TEST_RESOURCES_ENV, expand_path, find_config_file,
    resolve_test_resources,
};
