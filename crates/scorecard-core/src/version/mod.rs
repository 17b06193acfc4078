//! Game release timeline and chart-existence records.
//!
//! This module contains:
//! - `Version` - a named release with a `(major, minor)` ordinal
//! - `Region`, `EventVersion`, `ExistenceEvent` - per-region level history
//! - Timeline navigation (`next`, `previous`) and name/code lookups

mod table;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize, Serializer};
use strum::{EnumString, IntoStaticStr};

use crate::chart::InternalLevel;
use crate::game::Game;
use table::{CHUNITHM_VERSIONS, MAIMAI_VERSIONS, name_prefixes};

/// A game release. Each game's releases form a fixed chronological sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub game: Game,
    pub name: &'static str,
    pub major: u16,
    pub minor: u16,
    aliases: &'static [&'static str],
}

impl Version {
    pub fn ordinal(&self) -> (u16, u16) {
        (self.major, self.minor)
    }

    /// LXNS-style numeric version code (e.g. 24000 for BUDDiES)
    pub fn code(&self) -> u32 {
        self.major as u32 * 1000 + self.minor as u32 * 100
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal()
            .cmp(&other.ordinal())
            .then_with(|| self.name.cmp(other.name))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.game.title(), self.name)
    }
}

/// All releases of a game, oldest first.
pub fn versions(game: Game) -> &'static [Version] {
    match game {
        Game::Maimai => MAIMAI_VERSIONS,
        Game::Chunithm => CHUNITHM_VERSIONS,
    }
}

pub fn latest(game: Game) -> Version {
    let table = versions(game);
    table[table.len() - 1]
}

fn position(version: &Version) -> Option<usize> {
    versions(version.game)
        .iter()
        .position(|v| v.ordinal() == version.ordinal())
}

/// The release after `version`; identity for the newest or an unknown release.
pub fn next(version: Version) -> Version {
    match position(&version) {
        Some(index) => versions(version.game)
            .get(index + 1)
            .copied()
            .unwrap_or(version),
        None => version,
    }
}

/// The release before `version`; identity for the oldest or an unknown release.
pub fn previous(version: Version) -> Version {
    match position(&version) {
        Some(index) if index > 0 => versions(version.game)[index - 1],
        _ => version,
    }
}

pub fn find_by_ordinal(game: Game, major: u16, minor: u16) -> Option<Version> {
    versions(game)
        .iter()
        .find(|v| v.major == major && v.minor == minor)
        .copied()
}

/// Look up a release by its LXNS version code (e.g. 23500).
///
/// Codes inside a release's span (e.g. 24010) resolve to that release. Codes
/// from a series newer than the table are unknown.
pub fn find_by_code(game: Game, code: u32) -> Option<Version> {
    if code >= (latest(game).major as u32 + 1) * 1000 {
        return None;
    }
    versions(game)
        .iter()
        .rev()
        .find(|v| v.code() <= code)
        .copied()
}

/// Look up a release by display name or alias, ignoring case, spacing and
/// punctuation. Provider prefixes such as "maimai でらっくす" are accepted.
pub fn find_by_name(game: Game, name: &str) -> Option<Version> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    let table = versions(game);

    let exact = table.iter().find(|v| {
        std::iter::once(v.name)
            .chain(v.aliases.iter().copied())
            .any(|candidate| normalize_name(candidate) == wanted)
    });
    if let Some(version) = exact {
        return Some(*version);
    }

    name_prefixes(game)
        .iter()
        .filter_map(|prefix| wanted.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .find_map(|rest| {
            table.iter().find(|v| {
                std::iter::once(v.name)
                    .chain(v.aliases.iter().copied())
                    .any(|candidate| normalize_name(candidate) == rest)
            })
        })
        .copied()
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| c.is_alphanumeric() || *c > '\u{007F}')
        .collect()
}

/// Region a chart-existence record belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    #[serde(rename = "JPN")]
    #[strum(serialize = "JPN")]
    Jpn,
    #[serde(rename = "INT")]
    #[strum(serialize = "INT")]
    Int,
    #[serde(rename = "CHN")]
    #[strum(serialize = "CHN")]
    Chn,
    #[default]
    #[serde(other)]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl Region {
    /// Preference used when records share a release ordinal: CHN > JPN > INT.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Chn => 3,
            Self::Jpn => 2,
            Self::Int => 1,
            Self::Unknown => 0,
        }
    }
}

/// Version stamp of an existence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventVersion {
    pub major: u16,
    pub minor: u16,
    /// Tie-break ordinal among records of the same release
    #[serde(default)]
    pub release: u16,
    #[serde(default)]
    pub region: Region,
}

/// Stamp `version` with a region and a zeroed release ordinal, for use as a
/// synthetic "current" existence record.
pub fn to_event_version(version: Version, region: Region) -> EventVersion {
    EventVersion {
        major: version.major,
        minor: version.minor,
        release: 0,
        region,
    }
}

/// A chart existed at `level` in the given version/region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExistenceEvent {
    pub version: EventVersion,
    pub level: InternalLevel,
}

/// Precedence between two existence records.
///
/// `Greater` means `a` wins. Newer `(major, minor)` first, then the higher
/// release ordinal, then the higher region rank (CHN > JPN > INT).
pub fn event_precedence(a: &ExistenceEvent, b: &ExistenceEvent) -> Ordering {
    (a.version.major, a.version.minor)
        .cmp(&(b.version.major, b.version.minor))
        .then_with(|| a.version.release.cmp(&b.version.release))
        .then_with(|| a.version.region.rank().cmp(&b.version.region.rank()))
}

/// Pick the current level from a chart's existence records; 0 when empty.
///
/// Records that compare equal keep the earlier one.
pub fn select_current_level(events: &[ExistenceEvent]) -> InternalLevel {
    events
        .iter()
        .reduce(|best, event| {
            if event_precedence(event, best) == Ordering::Greater {
                event
            } else {
                best
            }
        })
        .map(|event| event.level)
        .unwrap_or(InternalLevel::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(release: u16, region: Region, level: f64) -> ExistenceEvent {
        ExistenceEvent {
            version: EventVersion {
                major: 24,
                minor: 0,
                release,
                region,
            },
            level: InternalLevel::from_f64(level),
        }
    }

    #[test]
    fn test_tables_strictly_ordered() {
        for game in [Game::Maimai, Game::Chunithm] {
            let table = versions(game);
            for pair in table.windows(2) {
                assert!(
                    pair[0].ordinal() < pair[1].ordinal(),
                    "{} not before {}",
                    pair[0],
                    pair[1]
                );
            }
            assert!(table.iter().all(|v| v.game == game));
        }
    }

    #[test]
    fn test_next_previous() {
        let buddies = find_by_name(Game::Maimai, "BUDDiES").unwrap();
        assert_eq!(next(buddies).name, "BUDDiES PLUS");
        assert_eq!(previous(buddies).name, "FESTiVAL PLUS");
    }

    #[test]
    fn test_next_previous_boundaries() {
        let newest = latest(Game::Chunithm);
        assert_eq!(next(newest), newest);
        let oldest = versions(Game::Chunithm)[0];
        assert_eq!(previous(oldest), oldest);
    }

    #[test]
    fn test_unknown_version_is_identity() {
        let bogus = Version {
            game: Game::Maimai,
            name: "bogus",
            major: 99,
            minor: 1,
            aliases: &[],
        };
        assert_eq!(next(bogus), bogus);
        assert_eq!(previous(bogus), bogus);
    }

    #[test]
    fn test_find_by_code() {
        assert_eq!(find_by_code(Game::Maimai, 24000).unwrap().name, "BUDDiES");
        assert_eq!(find_by_code(Game::Maimai, 23500).unwrap().name, "FESTiVAL PLUS");
        assert_eq!(find_by_code(Game::Maimai, 19900).unwrap().name, "FiNALE");
        assert_eq!(find_by_code(Game::Chunithm, 15500).unwrap().name, "PARADISE LOST");
        assert!(find_by_code(Game::Maimai, 500).is_none());
        assert!(find_by_code(Game::Maimai, 26000).is_none());
    }

    #[test]
    fn test_find_by_name_variants() {
        let cases = [
            ("maimai でらっくす BUDDiES", "BUDDiES"),
            ("maimai でらっくす PLUS", "DX PLUS"),
            ("maimai でらっくす", "DX"),
            ("maimai PLUS", "maimai PLUS"),
            ("maimai DX Splash PLUS", "Splash PLUS"),
            ("舞萌DX 2023", "FESTiVAL"),
            ("prism plus", "PRiSM PLUS"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                find_by_name(Game::Maimai, input).map(|v| v.name),
                Some(expected),
                "input: {}",
                input
            );
        }
        assert_eq!(
            find_by_name(Game::Chunithm, "paradiselost").unwrap().name,
            "PARADISE LOST"
        );
        assert_eq!(
            find_by_name(Game::Chunithm, "CHUNITHM NEW!!").unwrap().name,
            "NEW"
        );
        assert!(find_by_name(Game::Maimai, "").is_none());
        assert!(find_by_name(Game::Maimai, "ongeki bright").is_none());
    }

    #[test]
    fn test_to_event_version_zeroes_release() {
        let verse = find_by_name(Game::Chunithm, "VERSE").unwrap();
        let stamped = to_event_version(verse, Region::Jpn);
        assert_eq!(stamped.major, 23);
        assert_eq!(stamped.minor, 0);
        assert_eq!(stamped.release, 0);
        assert_eq!(stamped.region, Region::Jpn);
    }

    #[test]
    fn test_region_tie_break() {
        let jpn = event(1, Region::Jpn, 13.7);
        let chn = event(1, Region::Chn, 13.9);
        let int = event(1, Region::Int, 13.5);
        assert_eq!(select_current_level(&[jpn, chn]).hundredths(), 1390);
        assert_eq!(select_current_level(&[chn, jpn]).hundredths(), 1390);
        assert_eq!(select_current_level(&[int, jpn]).hundredths(), 1370);
    }

    #[test]
    fn test_release_beats_region() {
        let old_chn = event(1, Region::Chn, 13.9);
        let new_int = event(2, Region::Int, 14.0);
        assert_eq!(select_current_level(&[old_chn, new_int]).hundredths(), 1400);
    }

    #[test]
    fn test_newer_version_beats_release_and_region() {
        let mut old_chn = event(0, Region::Chn, 13.0);
        old_chn.version.major = 20;
        let current_jpn = event(0, Region::Jpn, 13.5);
        assert_eq!(select_current_level(&[old_chn, current_jpn]).hundredths(), 1350);

        let mut old_rerelease = event(1, Region::Jpn, 12.0);
        old_rerelease.version.major = 20;
        assert_eq!(select_current_level(&[old_rerelease, current_jpn]).hundredths(), 1350);
        assert_eq!(select_current_level(&[current_jpn, old_rerelease]).hundredths(), 1350);
    }

    #[test]
    fn test_minor_version_orders_before_release() {
        let mut plus = event(0, Region::Int, 14.2);
        plus.version.minor = 5;
        let base = event(3, Region::Chn, 14.0);
        assert_eq!(select_current_level(&[base, plus]).hundredths(), 1420);
    }

    #[test]
    fn test_no_events_is_zero() {
        assert_eq!(select_current_level(&[]), InternalLevel::ZERO);
    }

    #[test]
    fn test_region_deserialize_unknown() {
        let region: Region = serde_json::from_str("\"KOR\"").unwrap();
        assert_eq!(region, Region::Unknown);
        let region: Region = serde_json::from_str("\"CHN\"").unwrap();
        assert_eq!(region, Region::Chn);
    }
}
