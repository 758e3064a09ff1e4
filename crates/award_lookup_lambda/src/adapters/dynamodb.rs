use std::collections::HashMap;

use award_lookup_core::contract::{AwardBody, AwardRecord, CastRecord, AWARD_BODY_KEY};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Number, Value};

use crate::adapters::record_store::{RecordStore, StoreError};

const CAST_KEY_CONDITION: &str = "awardBody = :m";
const CAST_KEY_PLACEHOLDER: &str = ":m";

/// DynamoDB-backed record store. Built once per process and shared by every
/// invocation.
#[derive(Debug, Clone)]
pub struct DynamoDbRecordStore {
    client: aws_sdk_dynamodb::Client,
    awards_table: String,
    cast_table: String,
}

impl DynamoDbRecordStore {
    pub fn new(
        client: aws_sdk_dynamodb::Client,
        awards_table: impl Into<String>,
        cast_table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            awards_table: awards_table.into(),
            cast_table: cast_table.into(),
        }
    }
}

impl RecordStore for DynamoDbRecordStore {
    fn get_award(&self, award_body: AwardBody) -> Result<Option<AwardRecord>, StoreError> {
        let client = self.client.clone();
        let table_name = self.awards_table.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_item()
                    .table_name(table_name)
                    .key(AWARD_BODY_KEY, key_attribute(award_body))
                    .send()
                    .await
                    .map_err(|error| StoreError::Request {
                        operation: "GetItem",
                        message: DisplayErrorContext(&error).to_string(),
                    })
            })
        })?;

        output
            .item()
            .map(|item| item_to_json(item).map(AwardRecord))
            .transpose()
    }

    fn query_cast(&self, award_body: AwardBody) -> Result<Vec<CastRecord>, StoreError> {
        let client = self.client.clone();
        let table_name = self.cast_table.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .query()
                    .table_name(table_name)
                    .key_condition_expression(CAST_KEY_CONDITION)
                    .expression_attribute_values(CAST_KEY_PLACEHOLDER, key_attribute(award_body))
                    .send()
                    .await
                    .map_err(|error| StoreError::Request {
                        operation: "Query",
                        message: DisplayErrorContext(&error).to_string(),
                    })
            })
        })?;

        output
            .items()
            .iter()
            .map(|item| item_to_json(item).map(CastRecord))
            .collect()
    }
}

fn key_attribute(award_body: AwardBody) -> AttributeValue {
    AttributeValue::N(award_body.to_string())
}

/// Unmarshalls a DynamoDB item into plain JSON, the same shape a document
/// client returns with number wrapping disabled.
pub fn item_to_json(
    item: &HashMap<String, AttributeValue>,
) -> Result<Map<String, Value>, StoreError> {
    let mut converted = Map::with_capacity(item.len());
    for (name, value) in item {
        converted.insert(name.clone(), attribute_to_json(value)?);
    }
    Ok(converted)
}

pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, StoreError> {
    let converted = match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(raw) => Value::Number(parse_number(raw)?),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => encode_blob(blob),
        AttributeValue::M(entries) => Value::Object(item_to_json(entries)?),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|raw| parse_number(raw).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::Bs(values) => Value::Array(values.iter().map(encode_blob).collect()),
        other => {
            let message = format!("unsupported attribute value: {other:?}");
            return Err(StoreError::MalformedRecord(message));
        }
    };
    Ok(converted)
}

fn encode_blob(blob: &Blob) -> Value {
    let bytes: &[u8] = blob.as_ref();
    Value::String(BASE64.encode(bytes))
}

fn parse_number(raw: &str) -> Result<Number, StoreError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Number::from(value));
    }
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(Number::from(value));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::MalformedRecord(format!("invalid number attribute '{raw}'")))
}
