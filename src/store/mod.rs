mod dataset;
mod export;
mod ingest;

pub use dataset::{Dataset, DatasetStats};
pub use export::{to_json, write_report_csv};
pub use ingest::{TextRecord, load_records, read_records, save_records, write_records};
