//! Configuration management for the N-Queens assistant

pub mod settings;

pub use settings::{
    Settings, BoardConfig, EngineConfig, InferenceConfig, OutputConfig, OutputFormat,
    CliOverrides, MAX_BOARD_SIZE
};
