pub mod analyzer;
pub mod config;
pub mod filter;
pub mod forecast;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod utils;
