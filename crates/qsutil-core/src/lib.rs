pub mod config;
pub mod logging;

pub mod batch;
pub mod descriptor;
pub mod error;
pub mod fetch;
pub mod http;
pub mod icons;
pub mod mime;
pub mod naming;
pub mod provider;
pub mod region;
pub mod resolution;
pub mod store;
