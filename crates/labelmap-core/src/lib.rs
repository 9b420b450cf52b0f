pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod external;
pub mod generate;
pub mod label_map;
pub mod scan;
