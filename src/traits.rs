//! The nine named color traits that parameterize one rendered Sockybara.
//!
//! Values are kept as opaque strings. The renderer writes them verbatim into fill
//! attributes, so a malformed color produces an odd-looking image rather than an error.

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::SockyError;

/// Number of trait slots.
pub const SLOT_COUNT: usize = 9;

/// One named color slot, in ledger order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TraitSlot {
    FrontLeftSock,
    FrontRightSock,
    BackLeftSock,
    BackRightSock,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    Nose,
}

impl TraitSlot {
    pub const ALL: [TraitSlot; SLOT_COUNT] = [
        TraitSlot::FrontLeftSock,
        TraitSlot::FrontRightSock,
        TraitSlot::BackLeftSock,
        TraitSlot::BackRightSock,
        TraitSlot::LeftEye,
        TraitSlot::RightEye,
        TraitSlot::LeftEar,
        TraitSlot::RightEar,
        TraitSlot::Nose,
    ];

    /// Position of this slot in the trait tuple.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            TraitSlot::FrontLeftSock => "front-left-sock",
            TraitSlot::FrontRightSock => "front-right-sock",
            TraitSlot::BackLeftSock => "back-left-sock",
            TraitSlot::BackRightSock => "back-right-sock",
            TraitSlot::LeftEye => "left-eye",
            TraitSlot::RightEye => "right-eye",
            TraitSlot::LeftEar => "left-ear",
            TraitSlot::RightEar => "right-ear",
            TraitSlot::Nose => "nose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TraitSlot::FrontLeftSock => "Front Left Sock",
            TraitSlot::FrontRightSock => "Front Right Sock",
            TraitSlot::BackLeftSock => "Back Left Sock",
            TraitSlot::BackRightSock => "Back Right Sock",
            TraitSlot::LeftEye => "Left Eye",
            TraitSlot::RightEye => "Right Eye",
            TraitSlot::LeftEar => "Left Ear",
            TraitSlot::RightEar => "Right Ear",
            TraitSlot::Nose => "Nose",
        }
    }

    pub fn is_eye(self) -> bool {
        matches!(self, TraitSlot::LeftEye | TraitSlot::RightEye)
    }
}

impl fmt::Display for TraitSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TraitSlot {
    type Err = SockyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitSlot::ALL
            .into_iter()
            .find(|slot| slot.key() == s)
            .ok_or_else(|| SockyError::validation(format!("unknown trait slot \"{s}\"")))
    }
}

/// Prefix a raw ledger hex value with `#`, unless it already has one.
pub fn with_hex_marker(raw: &str) -> String {
    format!("#{}", raw.trim_start_matches('#'))
}

/// Fallback color per slot, applied to slots the trait source left unset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DefaultTable {
    values: [String; SLOT_COUNT],
}

impl DefaultTable {
    /// White for socks, ears and nose; black for both eyes.
    pub fn standard() -> Self {
        Self {
            values: TraitSlot::ALL.map(|slot| {
                if slot.is_eye() {
                    "black".to_owned()
                } else {
                    "white".to_owned()
                }
            }),
        }
    }

    pub fn get(&self, slot: TraitSlot) -> &str {
        &self.values[slot.index()]
    }

    pub fn with(mut self, slot: TraitSlot, value: impl Into<String>) -> Self {
        self.values[slot.index()] = value.into();
        self
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fully populated trait tuple, immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorTraits {
    values: [String; SLOT_COUNT],
}

impl ColorTraits {
    /// Take the values verbatim, in [`TraitSlot::ALL`] order.
    pub fn new(values: [String; SLOT_COUNT]) -> Self {
        Self { values }
    }

    /// Build from raw ledger hex (`"ff8800"`), supplying the `#` marker.
    ///
    /// A value that already carries a `#` is not marked twice.
    pub fn from_raw_hex<S: AsRef<str>>(values: [S; SLOT_COUNT]) -> Self {
        Self {
            values: values.map(|v| with_hex_marker(v.as_ref())),
        }
    }

    pub fn get(&self, slot: TraitSlot) -> &str {
        &self.values[slot.index()]
    }

    /// Copy of these traits with a single slot replaced.
    pub fn with(&self, slot: TraitSlot, value: impl Into<String>) -> Self {
        let mut values = self.values.clone();
        values[slot.index()] = value.into();
        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitSlot, &str)> {
        TraitSlot::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Default for ColorTraits {
    fn default() -> Self {
        PartialTraits::default().resolve(&DefaultTable::standard())
    }
}

/// Trait tuple with possibly missing slots, as handed over by a trait source.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PartialTraits {
    values: [Option<String>; SLOT_COUNT],
}

impl PartialTraits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: TraitSlot, value: impl Into<String>) -> &mut Self {
        self.values[slot.index()] = Some(value.into());
        self
    }

    pub fn get(&self, slot: TraitSlot) -> Option<&str> {
        self.values[slot.index()].as_deref()
    }

    /// Fill every unset slot from `defaults`.
    pub fn resolve(&self, defaults: &DefaultTable) -> ColorTraits {
        ColorTraits {
            values: TraitSlot::ALL.map(|slot| {
                self.get(slot)
                    .unwrap_or_else(|| defaults.get(slot))
                    .to_owned()
            }),
        }
    }
}

impl From<ColorTraits> for PartialTraits {
    fn from(traits: ColorTraits) -> Self {
        Self {
            values: traits.values.map(Some),
        }
    }
}
