use award_lookup_core::contract::{AwardBody, AwardRecord, CastRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{operation} request failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

/// Read access to the award and cast collections.
pub trait RecordStore: Send + Sync {
    fn get_award(&self, award_body: AwardBody) -> Result<Option<AwardRecord>, StoreError>;

    /// Cast rows whose `awardBody` equals the key, in store order.
    fn query_cast(&self, award_body: AwardBody) -> Result<Vec<CastRecord>, StoreError>;
}
