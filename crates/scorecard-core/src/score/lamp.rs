use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Combo lamp. CHUNITHM maps FC / AJ / AJC onto FullCombo / AllPerfect /
/// AllPerfectPlus.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoStaticStr,
)]
pub enum ComboTier {
    #[default]
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "FC")]
    FullCombo,
    #[strum(serialize = "FC+")]
    FullComboPlus,
    #[strum(serialize = "AP")]
    AllPerfect,
    #[strum(serialize = "AP+")]
    AllPerfectPlus,
}

impl ComboTier {
    /// maimai combo code from LXNS / DivingFish ("fc", "fcp", "ap", "app")
    pub fn from_maimai_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "fc" => Self::FullCombo,
            "fcp" => Self::FullComboPlus,
            "ap" => Self::AllPerfect,
            "app" => Self::AllPerfectPlus,
            _ => Self::None,
        }
    }

    /// CHUNITHM combo code ("fullcombo", "alljustice", "alljusticecritical")
    pub fn from_chunithm_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "fullcombo" | "fc" => Self::FullCombo,
            "alljustice" | "aj" => Self::AllPerfect,
            "alljusticecritical" | "ajc" => Self::AllPerfectPlus,
            _ => Self::None,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// Co-op sync lamp (maimai only)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoStaticStr,
)]
pub enum SyncTier {
    #[default]
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "SYNC")]
    SyncPlay,
    #[strum(serialize = "FS")]
    FullSync,
    #[strum(serialize = "FS+")]
    FullSyncPlus,
    #[strum(serialize = "FDX")]
    FullSyncDx,
    #[strum(serialize = "FDX+")]
    FullSyncDxPlus,
}

impl SyncTier {
    /// Sync code from LXNS / DivingFish ("sync", "fs", "fsp", "fsd", "fsdp")
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "sync" => Self::SyncPlay,
            "fs" => Self::FullSync,
            "fsp" => Self::FullSyncPlus,
            "fsd" | "fdx" => Self::FullSyncDx,
            "fsdp" | "fdxp" => Self::FullSyncDxPlus,
            _ => Self::None,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// Clear lamp
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoStaticStr,
)]
pub enum ClearTier {
    #[default]
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "FAILED")]
    Failed,
    #[strum(serialize = "CLEAR")]
    Clear,
    #[strum(serialize = "HARD")]
    Hard,
    #[strum(serialize = "BRAVE")]
    Brave,
    #[strum(serialize = "ABSOLUTE")]
    Absolute,
    #[strum(serialize = "CATASTROPHY")]
    Catastrophy,
}

impl ClearTier {
    /// Clear code from LXNS / KamaiTachi ("clear", "HARD", ...)
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "failed" => Self::Failed,
            "clear" => Self::Clear,
            "hard" => Self::Hard,
            "brave" => Self::Brave,
            "absolute" => Self::Absolute,
            "catastrophy" => Self::Catastrophy,
            _ => Self::None,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// Split a KamaiTachi lamp ("FULL COMBO+", "ALL JUSTICE", "CLEAR", ...) into
/// combo and clear tiers. Any combo lamp implies a clear.
pub fn from_kamaitachi_lamp(lamp: &str) -> (ComboTier, ClearTier) {
    match lamp.trim().to_ascii_uppercase().as_str() {
        "FAILED" => (ComboTier::None, ClearTier::Failed),
        "CLEAR" => (ComboTier::None, ClearTier::Clear),
        "FULL COMBO" => (ComboTier::FullCombo, ClearTier::Clear),
        "FULL COMBO+" => (ComboTier::FullComboPlus, ClearTier::Clear),
        "ALL PERFECT" | "ALL JUSTICE" => (ComboTier::AllPerfect, ClearTier::Clear),
        "ALL PERFECT+" | "ALL JUSTICE CRITICAL" => (ComboTier::AllPerfectPlus, ClearTier::Clear),
        _ => (ComboTier::None, ClearTier::None),
    }
}
