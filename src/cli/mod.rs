//! CLI command handlers

pub mod commands;

pub use commands::{
    assert_cell, get, headers, init_logging, project_id, project_url, resolve, run, watch,
};
