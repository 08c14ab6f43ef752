//! Where trait values come from.
//!
//! The ledger itself is out of scope; [`JsonTraitSource`] serves records from a local
//! JSON snapshot with the same shape (nine raw hex strings plus an owner).

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context as _;
use async_trait::async_trait;

use crate::foundation::error::{SockyError, SockyResult};
use crate::traits::{
    ColorTraits, DefaultTable, PartialTraits, SLOT_COUNT, TraitSlot, with_hex_marker,
};

/// Validated token identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct TokenId(u16);

impl TokenId {
    pub const MAX: u16 = 247;

    pub fn new(id: u16) -> SockyResult<Self> {
        if id > Self::MAX {
            return Err(out_of_range());
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

fn out_of_range() -> SockyError {
    SockyError::validation(format!("token id must be between 0 and {}", TokenId::MAX))
}

impl FromStr for TokenId {
    type Err = SockyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u16 = s.trim().parse().map_err(|_| out_of_range())?;
        Self::new(id)
    }
}

impl TryFrom<u16> for TokenId {
    type Error = SockyError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<TokenId> for u16 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitRecord {
    pub traits: ColorTraits,
    pub owner: Option<String>,
}

#[async_trait]
pub trait TraitSource: Send + Sync {
    async fn fetch(&self, id: TokenId) -> SockyResult<TraitRecord>;
}

#[derive(Debug, serde::Deserialize)]
struct RecordRepr {
    traits: [Option<String>; SLOT_COUNT],
    #[serde(default)]
    owner: Option<String>,
}

/// Trait records loaded from a JSON object keyed by token id:
///
/// ```json
/// { "7": { "traits": ["ff0000", "00ff00", ...], "owner": "0xabc..." } }
/// ```
///
/// `null` trait entries fall back to the default table.
#[derive(Debug)]
pub struct JsonTraitSource {
    records: BTreeMap<TokenId, TraitRecord>,
}

impl JsonTraitSource {
    pub fn from_path(path: &Path) -> SockyResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open trait source '{}'", path.display()))?;
        let raw: BTreeMap<String, RecordRepr> = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| SockyError::serde(format!("trait source '{}': {e}", path.display())))?;
        Self::from_records(raw, &DefaultTable::standard())
    }

    pub fn from_json_str(json: &str) -> SockyResult<Self> {
        let raw: BTreeMap<String, RecordRepr> =
            serde_json::from_str(json).map_err(|e| SockyError::serde(e.to_string()))?;
        Self::from_records(raw, &DefaultTable::standard())
    }

    fn from_records(
        raw: BTreeMap<String, RecordRepr>,
        defaults: &DefaultTable,
    ) -> SockyResult<Self> {
        let mut records = BTreeMap::new();
        for (key, repr) in raw {
            let id: TokenId = key.parse()?;
            let mut partial = PartialTraits::new();
            for (slot, value) in TraitSlot::ALL.into_iter().zip(repr.traits) {
                if let Some(v) = value {
                    partial.set(slot, with_hex_marker(&v));
                }
            }
            records.insert(
                id,
                TraitRecord {
                    traits: partial.resolve(defaults),
                    owner: repr.owner,
                },
            );
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TraitSource for JsonTraitSource {
    async fn fetch(&self, id: TokenId) -> SockyResult<TraitRecord> {
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| SockyError::validation(format!("no traits recorded for token {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_id_bounds() {
        assert_eq!("0".parse::<TokenId>().unwrap().get(), 0);
        assert_eq!(" 247 ".parse::<TokenId>().unwrap().get(), 247);

        let err = "248".parse::<TokenId>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: token id must be between 0 and 247"
        );
        assert!("-1".parse::<TokenId>().is_err());
        assert!("seven".parse::<TokenId>().is_err());
    }

    #[test]
    fn token_id_deserializes_with_validation() {
        let id: TokenId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
        assert!(serde_json::from_str::<TokenId>("300").is_err());
    }

    #[test]
    fn wrong_arity_is_a_serde_error() {
        let err = JsonTraitSource::from_json_str(r#"{"1": {"traits": ["ff0000"]}}"#).unwrap_err();
        assert!(matches!(err, SockyError::Serde(_)));
    }

    #[test]
    fn records_share_the_raw_hex_marker() {
        let json = r##"{"4": {"traits": ["ff0000", "#00ff00", null, null, null, null, null, null, null]}}"##;
        let source = JsonTraitSource::from_json_str(json).unwrap();
        let traits = &source.records[&TokenId::new(4).unwrap()].traits;
        assert_eq!(traits.get(TraitSlot::FrontLeftSock), "#ff0000");
        assert_eq!(traits.get(TraitSlot::FrontRightSock), "#00ff00");
        assert_eq!(traits.get(TraitSlot::LeftEye), "black");
    }

    #[test]
    fn out_of_range_keys_are_rejected() {
        let json = r#"{"999": {"traits": [null, null, null, null, null, null, null, null, null]}}"#;
        assert!(matches!(
            JsonTraitSource::from_json_str(json),
            Err(SockyError::Validation(_))
        ));
    }
}
