pub mod error;
pub mod ingest;
pub mod metric;
pub mod summary;

pub use error::IngestError;
pub use ingest::{ingest, load_and_ingest, merge_batch, Ingested, SCRAPE_ID_FORMAT};
pub use metric::{parse_metric, rank_value};
pub use summary::{summary_lines, top_by_views};
