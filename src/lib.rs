pub mod analyzers;
pub mod category;
pub mod config;
pub mod error;
pub mod geography;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;
pub mod table;
