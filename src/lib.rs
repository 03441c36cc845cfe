// Library for tests to access modules

pub mod config;
pub mod detect;
pub mod errors;
pub mod flatten;
pub mod ingest;
pub mod models;
pub mod report;
pub mod store;
pub mod timing;
pub mod version;
