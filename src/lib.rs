pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod fs_util;
pub mod normalize;
pub mod output;
pub mod reconcile;
pub mod registry;
pub mod report;
