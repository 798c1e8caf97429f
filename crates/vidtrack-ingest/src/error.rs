use thiserror::Error;
use vidtrack_store::StoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to load state: {0}")]
    Load(#[source] StoreError),

    #[error("scrape {scrape_id} was merged but not saved: {source}")]
    Persist {
        scrape_id: String,
        #[source]
        source: StoreError,
    },
}
