//! Serialized forms of a record set
//!
//! Both encodings carry the same shape: an ordered list of
//! `{"hash": <string>, "value": <number>}` objects. Decoding absorbs the
//! batch into the set (replace when empty, merge otherwise); a payload that
//! fails to parse leaves the set untouched.
//!
//! JSON has no representation for NaN or infinity, so `encode_json` refuses
//! sets holding non-finite values instead of writing `null`.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::set::RecordSet;
use crate::signal::CollisionSignal;
use serde::de::DeserializeSeed;
use serde::{Deserialize, Deserializer, Serialize};

/// Supported encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Codec {
    #[default]
    Json,
    MessagePack,
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::Json => write!(f, "json"),
            Codec::MessagePack => write!(f, "msgpack"),
        }
    }
}

impl std::str::FromStr for Codec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Codec::Json),
            "msgpack" | "messagepack" | "message-pack" => Ok(Codec::MessagePack),
            _ => Err(Error::Config(format!("Unknown codec: {}", s))),
        }
    }
}

impl RecordSet {
    pub fn decode(&mut self, codec: Codec, payload: &[u8]) -> Result<CollisionSignal> {
        match codec {
            Codec::Json => self.decode_json(payload),
            Codec::MessagePack => self.decode_msgpack(payload),
        }
    }

    pub fn encode(&self, codec: Codec) -> Result<Vec<u8>> {
        match codec {
            Codec::Json => self.encode_json(),
            Codec::MessagePack => self.encode_msgpack(),
        }
    }

    pub fn decode_json(&mut self, payload: &[u8]) -> Result<CollisionSignal> {
        let batch: Vec<Record> = serde_json::from_slice(payload)?;
        Ok(self.absorb(batch))
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        if let Some(record) = self.iter().find(|r| !r.value.is_finite()) {
            return Err(Error::Serialization(format!(
                "value {} for hash {} has no JSON representation",
                record.value, record.hash
            )));
        }
        serde_json::to_vec(self.records()).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn decode_msgpack(&mut self, payload: &[u8]) -> Result<CollisionSignal> {
        let batch: Vec<Record> = rmp_serde::from_slice(payload)?;
        Ok(self.absorb(batch))
    }

    /// Records are written as maps so field names survive the round trip
    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self.records()).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Lets a set take a record list straight from any serde deserializer.
/// The batch is absorbed exactly like `decode_*` does and the collision
/// signal is returned.
impl<'de> DeserializeSeed<'de> for &mut RecordSet {
    type Value = CollisionSignal;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<CollisionSignal, D::Error> {
        let batch = Vec::<Record>::deserialize(deserializer)?;
        Ok(self.absorb(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("asd1", 78.1335),
            Record::new("asd2", 78.1335),
            Record::new("asd3", 78.1336),
        ]
    }

    #[test]
    fn test_encode_json_matches_record_list() {
        let mut set = RecordSet::new(10);
        let _ = set.replace(sample());

        let expected = serde_json::to_vec(&sample()).unwrap();
        assert_eq!(set.encode_json().unwrap(), expected);
    }

    #[test]
    fn test_decode_json_into_empty_replaces() {
        let raw = serde_json::to_vec(&sample()).unwrap();
        let mut set = RecordSet::new(10);
        assert!(set.decode_json(&raw).unwrap().is_empty());
        assert_eq!(set.records(), sample().as_slice());
    }

    #[test]
    fn test_decode_twice_accumulates() {
        let raw = serde_json::to_vec(&sample()).unwrap();
        let extra = serde_json::to_vec(&[Record::new("asd4", 1.0)]).unwrap();

        let mut set = RecordSet::new(10);
        let _ = set.decode_json(&raw).unwrap();
        let _ = set.decode_json(&extra).unwrap();
        assert_eq!(set.len(), 4);

        let signal = set.decode_json(&raw).unwrap();
        assert_eq!(signal, CollisionSignal::HASH_MATCH);
        assert_eq!(set.len(), 4);
        assert_eq!(set.records()[0].hash, "asd4");
    }

    #[test]
    fn test_decode_malformed_leaves_set_unchanged() {
        let mut set = RecordSet::new(10);
        let _ = set.replace(sample());

        for payload in [&br#""{"WRONG": "JSON", "DATA": 3}"#[..], &b"INVALID DATA"[..]] {
            let err = set.decode_json(payload).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed);
            assert!(!err.is_non_fatal());
        }
        assert_eq!(set.records(), sample().as_slice());
    }

    #[test]
    fn test_msgpack_round_trip() {
        let mut set = RecordSet::new(10);
        let _ = set.replace(sample());
        let raw = set.encode(Codec::MessagePack).unwrap();

        let mut fresh = RecordSet::new(10);
        assert!(fresh.decode(Codec::MessagePack, &raw).unwrap().is_empty());
        assert_eq!(fresh, set);
    }

    #[test]
    fn test_msgpack_malformed() {
        let mut set = RecordSet::new(10);
        let err = set.decode_msgpack(&[0xc1, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(set.is_empty());
    }

    #[test]
    fn test_encode_json_rejects_non_finite() {
        let mut set = RecordSet::new(10);
        let _ = set.replace(vec![
            Record::new("a", f64::NAN),
            Record::new("b", f64::INFINITY),
        ]);

        let err = set.encode_json().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
        assert!(err.to_string().contains("hash a"));

        let err = set.encode(Codec::Json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_msgpack_keeps_infinity() {
        let mut set = RecordSet::new(10);
        let _ = set.replace(vec![Record::new("a", f64::NEG_INFINITY)]);
        let raw = set.encode_msgpack().unwrap();

        let mut fresh = RecordSet::new(10);
        let _ = fresh.decode_msgpack(&raw).unwrap();
        assert_eq!(fresh.records(), set.records());
    }

    #[test]
    fn test_deserialize_seed_absorbs() {
        let mut set = RecordSet::new(10);
        let _ = set.replace(sample());

        let raw = br#"[{"hash":"asd1","value":1.0},{"hash":"asd9","value":2.0}]"#;
        let mut de = serde_json::Deserializer::from_slice(raw);
        let signal = (&mut set).deserialize(&mut de).unwrap();
        de.end().unwrap();

        assert_eq!(signal, CollisionSignal::HASH_MATCH);
        let order: Vec<&str> = set.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(order, vec!["asd2", "asd3", "asd1", "asd9"]);
        assert_eq!(set.get("asd1").map(|r| r.value), Some(1.0));
    }

    #[test]
    fn test_codec_from_str() {
        assert_eq!("json".parse::<Codec>().unwrap(), Codec::Json);
        assert_eq!("MsgPack".parse::<Codec>().unwrap(), Codec::MessagePack);
        assert!("yaml".parse::<Codec>().is_err());
    }
}
