//! JSON/BSON document conversions
//!
//! Records cross the repository port as JSON objects; the driver speaks BSON.

use bson::Bson;
use flowdesk_domain::error::{Error, Result};
use flowdesk_domain::value_objects::Document;
use serde_json::Value;

/// Convert a JSON document (record or filter) into a BSON document
pub fn to_bson_document(document: &Document) -> Result<bson::Document> {
    bson::to_document(document).map_err(|e| {
        Error::serialization_with_source(format!("cannot encode document as BSON: {e}"), e)
    })
}

/// Convert a BSON document returned by the store into a JSON document
///
/// Uses relaxed extended JSON: numbers stay plain numbers, store-specific
/// types such as dates become `{"$date": ...}` objects.
pub fn from_bson_document(document: bson::Document) -> Result<Document> {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(document) => Ok(document),
        _ => Err(Error::serialization("BSON document did not convert to an object")),
    }
}

/// `{"$or": [filters...]}`
pub fn any_of(filters: &[Document]) -> Result<bson::Document> {
    let clauses = filters
        .iter()
        .map(|filter| to_bson_document(filter).map(Bson::Document))
        .collect::<Result<Vec<_>>>()?;
    Ok(bson::doc! { "$or": clauses })
}
