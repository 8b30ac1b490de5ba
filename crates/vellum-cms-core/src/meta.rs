// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed post metadata.
//!
//! On the wire a metadata record carries five nullable value slots
//! (`valueText`, `valueNumber`, `valueBoolean`, `valueTimestamp`, `value`).
//! Decoding collapses them into a single [`MetaValue`] by taking the first
//! populated slot in that order. Extra populated slots are ignored without
//! complaint. A `valueTimestamp` string that does not parse as a date is kept
//! as [`MetaValue::Json`] holding the raw string, so one bad record never
//! rejects the post that carries it. Encoding always writes exactly one slot and nulls the rest, so an
//! upsert replaces the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{MetaId, PostId};

/// The effective value of a metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetaValue {
	Text(String),
	Number(f64),
	Boolean(bool),
	Timestamp(DateTime<Utc>),
	Json(Value),
}

/// A metadata record attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MetaRecord", into = "MetaRecord")]
pub struct Meta {
	pub id: MetaId,
	pub post_id: PostId,
	pub key: String,
	/// `None` when the server sent a record with every slot null.
	pub value: Option<MetaValue>,
}

/// Metadata payload for `POST /api/posts/:id/meta`; the server upserts by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetaInputRecord", into = "MetaInputRecord")]
pub struct MetaInput {
	pub key: String,
	pub value: MetaValue,
}

impl MetaInput {
	pub fn new(key: impl Into<String>, value: MetaValue) -> Self {
		Self {
			key: key.into(),
			value,
		}
	}

	pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(key, MetaValue::Text(value.into()))
	}

	pub fn number(key: impl Into<String>, value: f64) -> Self {
		Self::new(key, MetaValue::Number(value))
	}

	pub fn boolean(key: impl Into<String>, value: bool) -> Self {
		Self::new(key, MetaValue::Boolean(value))
	}

	pub fn timestamp(key: impl Into<String>, value: DateTime<Utc>) -> Self {
		Self::new(key, MetaValue::Timestamp(value))
	}

	pub fn json(key: impl Into<String>, value: Value) -> Self {
		Self::new(key, MetaValue::Json(value))
	}
}

#[derive(Debug, Default)]
struct Slots {
	text: Option<String>,
	number: Option<f64>,
	boolean: Option<bool>,
	timestamp: Option<DateTime<Utc>>,
	json: Option<Value>,
}

impl Slots {
	/// Priority: text, number, boolean, timestamp, generic.
	fn resolve(self) -> Option<MetaValue> {
		if let Some(text) = self.text {
			return Some(MetaValue::Text(text));
		}
		if let Some(number) = self.number {
			return Some(MetaValue::Number(number));
		}
		if let Some(boolean) = self.boolean {
			return Some(MetaValue::Boolean(boolean));
		}
		if let Some(timestamp) = self.timestamp {
			return Some(MetaValue::Timestamp(timestamp));
		}
		self.json.map(MetaValue::Json)
	}

	/// Server-side slot decode. `valueTimestamp` is parsed leniently and an
	/// unparseable string takes the generic slot's place.
	fn with_timestamp_slot(mut self, raw: Option<String>) -> Self {
		if let Some(raw) = raw {
			match parse_timestamp(&raw) {
				Some(ts) => self.timestamp = Some(ts),
				None => self.json = Some(Value::String(raw)),
			}
		}
		self
	}

	fn from_value(value: Option<MetaValue>) -> Self {
		let mut slots = Slots::default();
		match value {
			Some(MetaValue::Text(v)) => slots.text = Some(v),
			Some(MetaValue::Number(v)) => slots.number = Some(v),
			Some(MetaValue::Boolean(v)) => slots.boolean = Some(v),
			Some(MetaValue::Timestamp(v)) => slots.timestamp = Some(v),
			Some(MetaValue::Json(v)) => slots.json = Some(v),
			None => {}
		}
		slots
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaRecord {
	id: MetaId,
	post_id: PostId,
	key: String,
	#[serde(default)]
	value_text: Option<String>,
	#[serde(default)]
	value_number: Option<f64>,
	#[serde(default)]
	value_boolean: Option<bool>,
	#[serde(default)]
	value_timestamp: Option<String>,
	#[serde(default)]
	value: Option<Value>,
}

impl From<MetaRecord> for Meta {
	fn from(record: MetaRecord) -> Self {
		let value = Slots {
			text: record.value_text,
			number: record.value_number,
			boolean: record.value_boolean,
			timestamp: None,
			json: record.value,
		}
		.with_timestamp_slot(record.value_timestamp)
		.resolve();

		Self {
			id: record.id,
			post_id: record.post_id,
			key: record.key,
			value,
		}
	}
}

impl From<Meta> for MetaRecord {
	fn from(meta: Meta) -> Self {
		let slots = Slots::from_value(meta.value);
		Self {
			id: meta.id,
			post_id: meta.post_id,
			key: meta.key,
			value_text: slots.text,
			value_number: slots.number,
			value_boolean: slots.boolean,
			value_timestamp: slots
				.timestamp
				.map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
			value: slots.json,
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaInputRecord {
	key: String,
	#[serde(default)]
	value_text: Option<String>,
	#[serde(default)]
	value_number: Option<f64>,
	#[serde(default)]
	value_boolean: Option<bool>,
	#[serde(default)]
	value_timestamp: Option<DateTime<Utc>>,
	#[serde(default)]
	value: Option<Value>,
}

impl TryFrom<MetaInputRecord> for MetaInput {
	type Error = String;

	fn try_from(record: MetaInputRecord) -> Result<Self, Self::Error> {
		let value = Slots {
			text: record.value_text,
			number: record.value_number,
			boolean: record.value_boolean,
			timestamp: record.value_timestamp,
			json: record.value,
		}
		.resolve()
		.ok_or_else(|| format!("meta input '{}' has no value", record.key))?;

		Ok(Self {
			key: record.key,
			value,
		})
	}
}

impl From<MetaInput> for MetaInputRecord {
	fn from(input: MetaInput) -> Self {
		let slots = Slots::from_value(Some(input.value));
		Self {
			key: input.key,
			value_text: slots.text,
			value_number: slots.number,
			value_boolean: slots.boolean,
			value_timestamp: slots.timestamp,
			value: slots.json,
		}
	}
}

/// Resolve the effective value for `key`.
///
/// The first record with a matching key wins, even if a later record with the
/// same key carries a value.
pub fn get_meta_value<'a>(meta: &'a [Meta], key: &str) -> Option<&'a MetaValue> {
	meta
		.iter()
		.find(|m| m.key == key)
		.and_then(|m| m.value.as_ref())
}

pub fn get_meta_text<'a>(meta: &'a [Meta], key: &str) -> Option<&'a str> {
	match get_meta_value(meta, key)? {
		MetaValue::Text(s) => Some(s),
		MetaValue::Json(Value::String(s)) => Some(s),
		_ => None,
	}
}

pub fn get_meta_number(meta: &[Meta], key: &str) -> Option<f64> {
	match get_meta_value(meta, key)? {
		MetaValue::Number(n) => Some(*n),
		MetaValue::Json(Value::Number(n)) => n.as_f64(),
		_ => None,
	}
}

pub fn get_meta_boolean(meta: &[Meta], key: &str) -> Option<bool> {
	match get_meta_value(meta, key)? {
		MetaValue::Boolean(b) => Some(*b),
		MetaValue::Json(Value::Bool(b)) => Some(*b),
		_ => None,
	}
}

/// Timestamp accessor. Besides a stored timestamp, a string value is parsed
/// as RFC 3339, as a date-time without offset (UTC), or as a bare date
/// (midnight UTC). Anything else yields `None`.
pub fn get_meta_timestamp(meta: &[Meta], key: &str) -> Option<DateTime<Utc>> {
	match get_meta_value(meta, key)? {
		MetaValue::Timestamp(ts) => Some(*ts),
		MetaValue::Text(s) => parse_timestamp(s),
		MetaValue::Json(Value::String(s)) => parse_timestamp(s),
		_ => None,
	}
}

pub fn get_meta_array<'a>(meta: &'a [Meta], key: &str) -> Option<&'a [Value]> {
	match get_meta_value(meta, key)? {
		MetaValue::Json(Value::Array(items)) => Some(items.as_slice()),
		_ => None,
	}
}

pub fn get_meta_object<'a>(meta: &'a [Meta], key: &str) -> Option<&'a Map<String, Value>> {
	match get_meta_value(meta, key)? {
		MetaValue::Json(Value::Object(map)) => Some(map),
		_ => None,
	}
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%dT%H:%M",
];

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	let s = raw.trim();

	if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
		return Some(dt.with_timezone(&Utc));
	}

	for format in NAIVE_DATETIME_FORMATS {
		if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
			return Some(Utc.from_utc_datetime(&naive));
		}
	}

	NaiveDate::parse_from_str(s, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn record(key: &str, slots: Value) -> Meta {
		let mut body = json!({ "id": format!("m-{key}"), "postId": "p1", "key": key });
		if let (Some(obj), Some(extra)) = (body.as_object_mut(), slots.as_object()) {
			for (k, v) in extra {
				obj.insert(k.clone(), v.clone());
			}
		}
		serde_json::from_value(body).unwrap()
	}

	mod decoding {
		use super::*;

		#[test]
		fn text_slot_beats_number_slot() {
			let meta = record("views", json!({ "valueText": "x", "valueNumber": 5 }));
			assert_eq!(meta.value, Some(MetaValue::Text("x".to_string())));
		}

		#[test]
		fn boolean_beats_timestamp_and_generic() {
			let meta = record(
				"featured",
				json!({
					"valueBoolean": false,
					"valueTimestamp": "2025-01-01T00:00:00Z",
					"value": [1, 2]
				}),
			);
			assert_eq!(meta.value, Some(MetaValue::Boolean(false)));
		}

		#[test]
		fn all_null_slots_decode_to_none() {
			let meta = record(
				"empty",
				json!({ "valueText": null, "valueNumber": null, "value": null }),
			);
			assert_eq!(meta.value, None);
		}

		#[test]
		fn timestamp_slot_accepts_naive_date_times() {
			let meta = record("startsAt", json!({ "valueTimestamp": "2025-05-01 10:30:00" }));
			assert_eq!(
				meta.value,
				Some(MetaValue::Timestamp(
					Utc.with_ymd_and_hms(2025, 5, 1, 10, 30, 0).unwrap()
				))
			);
		}

		#[test]
		fn unparseable_timestamp_slot_keeps_raw_string() {
			let meta = record(
				"startsAt",
				json!({ "valueTimestamp": "sometime in may", "value": [1] }),
			);
			assert_eq!(
				meta.value,
				Some(MetaValue::Json(json!("sometime in may")))
			);
			assert_eq!(get_meta_timestamp(std::slice::from_ref(&meta), "startsAt"), None);
			assert_eq!(
				get_meta_text(std::slice::from_ref(&meta), "startsAt"),
				Some("sometime in may")
			);
		}

		#[test]
		fn stored_timestamp_encodes_as_rfc3339() {
			let meta = record("startsAt", json!({ "valueTimestamp": "2025-05-01T10:30:00Z" }));
			let encoded = serde_json::to_value(&meta).unwrap();
			assert_eq!(encoded["valueTimestamp"], json!("2025-05-01T10:30:00Z"));
			assert_eq!(encoded["value"], Value::Null);
		}

		#[test]
		fn generic_slot_is_used_last() {
			let meta = record("tags", json!({ "value": ["a", "b"] }));
			assert_eq!(meta.value, Some(MetaValue::Json(json!(["a", "b"]))));
		}

		#[test]
		fn encoding_writes_one_slot_and_nulls_the_rest() {
			let input = MetaInput::number("views", 0.0);
			assert_eq!(
				serde_json::to_value(&input).unwrap(),
				json!({
					"key": "views",
					"valueText": null,
					"valueNumber": 0.0,
					"valueBoolean": null,
					"valueTimestamp": null,
					"value": null
				})
			);
		}

		#[test]
		fn meta_input_without_value_is_rejected() {
			let result: Result<MetaInput, _> = serde_json::from_value(json!({ "key": "views" }));
			assert!(result.is_err());
		}
	}

	mod accessors {
		use super::*;

		#[test]
		fn first_matching_key_wins() {
			let list = vec![
				record("venue", json!({ "valueText": "Main Hall" })),
				record("venue", json!({ "valueText": "Annex" })),
			];
			assert_eq!(get_meta_text(&list, "venue"), Some("Main Hall"));
		}

		#[test]
		fn first_match_without_value_does_not_fall_through() {
			let list = vec![
				record("venue", json!({})),
				record("venue", json!({ "valueText": "Annex" })),
			];
			assert_eq!(get_meta_value(&list, "venue"), None);
		}

		#[test]
		fn missing_key_is_none() {
			let list = vec![record("venue", json!({ "valueText": "Main Hall" }))];
			assert_eq!(get_meta_value(&list, "capacity"), None);
		}

		#[test]
		fn number_accessor_does_not_coerce_strings() {
			let list = vec![record("views", json!({ "valueText": "12" }))];
			assert_eq!(get_meta_number(&list, "views"), None);
		}

		#[test]
		fn text_accessor_does_not_stringify_numbers() {
			let list = vec![record("views", json!({ "valueNumber": 12 }))];
			assert_eq!(get_meta_text(&list, "views"), None);
			assert_eq!(get_meta_number(&list, "views"), Some(12.0));
		}

		#[test]
		fn generic_slot_matches_by_runtime_type() {
			let list = vec![
				record("a", json!({ "value": "hello" })),
				record("b", json!({ "value": 3 })),
				record("c", json!({ "value": true })),
				record("d", json!({ "value": { "lat": 37.5 } })),
				record("e", json!({ "value": [1, 2, 3] })),
			];
			assert_eq!(get_meta_text(&list, "a"), Some("hello"));
			assert_eq!(get_meta_number(&list, "b"), Some(3.0));
			assert_eq!(get_meta_boolean(&list, "c"), Some(true));
			assert!(get_meta_object(&list, "d").unwrap().contains_key("lat"));
			assert_eq!(get_meta_array(&list, "e").unwrap().len(), 3);

			assert_eq!(get_meta_array(&list, "d"), None);
			assert_eq!(get_meta_object(&list, "e"), None);
			assert_eq!(get_meta_boolean(&list, "b"), None);
		}

		#[test]
		fn timestamp_accessor_accepts_stored_timestamps() {
			let list = vec![record(
				"startsAt",
				json!({ "valueTimestamp": "2025-05-01T10:30:00Z" }),
			)];
			let ts = get_meta_timestamp(&list, "startsAt").unwrap();
			assert_eq!(ts.to_rfc3339(), "2025-05-01T10:30:00+00:00");
		}

		#[test]
		fn timestamp_accessor_parses_strings() {
			let list = vec![
				record("rfc", json!({ "valueText": "2025-05-01T19:30:00+09:00" })),
				record("naive", json!({ "valueText": "2025-05-01T10:30:00" })),
				record("date", json!({ "value": "2025-05-01" })),
				record("junk", json!({ "valueText": "next tuesday" })),
				record("num", json!({ "valueNumber": 1714559400 })),
			];

			let expected = Utc.with_ymd_and_hms(2025, 5, 1, 10, 30, 0).unwrap();
			assert_eq!(get_meta_timestamp(&list, "rfc"), Some(expected));
			assert_eq!(get_meta_timestamp(&list, "naive"), Some(expected));
			assert_eq!(
				get_meta_timestamp(&list, "date"),
				Some(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap())
			);
			assert_eq!(get_meta_timestamp(&list, "junk"), None);
			assert_eq!(get_meta_timestamp(&list, "num"), None);
		}
	}

	mod property_tests {
		use super::*;

		proptest! {
			#[test]
			fn text_always_wins_when_present(
				text in "[a-z]{0,12}",
				number in any::<i32>(),
				flag in any::<bool>(),
			) {
				let meta = record("k", json!({
					"valueText": text.clone(),
					"valueNumber": number,
					"valueBoolean": flag,
					"value": { "n": number }
				}));
				prop_assert_eq!(meta.value, Some(MetaValue::Text(text)));
			}

			#[test]
			fn typed_accessors_never_coerce_text(text in "[a-zA-Z0-9 ]{1,20}") {
				let list = vec![record("k", json!({ "valueText": text }))];
				prop_assert_eq!(get_meta_number(&list, "k"), None);
				prop_assert_eq!(get_meta_boolean(&list, "k"), None);
				prop_assert!(get_meta_array(&list, "k").is_none());
				prop_assert!(get_meta_object(&list, "k").is_none());
			}
		}
	}
}
