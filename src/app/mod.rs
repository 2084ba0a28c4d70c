pub mod ports;
pub mod aggregate_use_case;
pub mod enrich_use_case;
pub mod sync_use_case;
