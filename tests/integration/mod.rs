//! Integration tests for the content outline pipeline

mod cli_commands;
mod provider_http;
mod test_utils;
