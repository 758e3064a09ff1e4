use std::collections::BTreeMap;
use std::sync::Mutex;

use award_lookup_core::contract::{AwardBody, AwardRecord, CastRecord};
use award_lookup_lambda::adapters::record_store::{RecordStore, StoreError};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    GetAward(i64),
    QueryCast(i64),
}

/// In-memory award and cast tables with a call log.
#[derive(Default)]
pub struct InMemoryStore {
    awards: BTreeMap<i64, AwardRecord>,
    cast: Vec<CastRecord>,
    award_failure: Option<StoreError>,
    cast_failure: Option<StoreError>,
    calls: Mutex<Vec<StoreCall>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_award(mut self, attributes: Value) -> Self {
        let record = AwardRecord::from(object(attributes));
        let key = record
            .attribute("awardBody")
            .and_then(Value::as_i64)
            .expect("award fixture needs a numeric awardBody");
        self.awards.insert(key, record);
        self
    }

    pub fn with_cast(mut self, attributes: Value) -> Self {
        self.cast.push(CastRecord::from(object(attributes)));
        self
    }

    pub fn failing_on_award(mut self, error: StoreError) -> Self {
        self.award_failure = Some(error);
        self
    }

    pub fn failing_on_cast(mut self, error: StoreError) -> Self {
        self.cast_failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    fn record_call(&self, call: StoreCall) -> Result<(), StoreError> {
        let failure = match call {
            StoreCall::GetAward(_) => &self.award_failure,
            StoreCall::QueryCast(_) => &self.cast_failure,
        };
        self.calls.lock().expect("poisoned mutex").push(call);
        match failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl RecordStore for InMemoryStore {
    fn get_award(&self, award_body: AwardBody) -> Result<Option<AwardRecord>, StoreError> {
        self.record_call(StoreCall::GetAward(award_body.get()))?;
        Ok(self.awards.get(&award_body.get()).cloned())
    }

    fn query_cast(&self, award_body: AwardBody) -> Result<Vec<CastRecord>, StoreError> {
        self.record_call(StoreCall::QueryCast(award_body.get()))?;
        Ok(self
            .cast
            .iter()
            .filter(|record| {
                record.attribute("awardBody").and_then(Value::as_i64) == Some(award_body.get())
            })
            .cloned()
            .collect())
    }
}

fn object(value: Value) -> serde_json::Map<String, Value> {
    value
        .as_object()
        .cloned()
        .expect("fixture must be a JSON object")
}
