use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Internal (constant) level of a chart, stored in hundredths.
///
/// `13.7` is held as `1370` so rating math stays in exact integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InternalLevel(u32);

impl InternalLevel {
    pub const ZERO: Self = Self(0);

    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Round to the nearest hundredth; negative or non-finite input is 0.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::ZERO;
        }
        Self((value * 100.0).round() as u32)
    }

    pub fn hundredths(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for InternalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 10 == 0 {
            write!(f, "{}.{}", self.0 / 100, (self.0 % 100) / 10)
        } else {
            write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

impl Serialize for InternalLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for InternalLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Self::from_f64(value))
    }
}
