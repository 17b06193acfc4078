use crate::game::Game;
use crate::version::Version;

const fn maimai(name: &'static str, major: u16, minor: u16, aliases: &'static [&'static str]) -> Version {
    Version {
        game: Game::Maimai,
        name,
        major,
        minor,
        aliases,
    }
}

const fn chunithm(
    name: &'static str,
    major: u16,
    minor: u16,
    aliases: &'static [&'static str],
) -> Version {
    Version {
        game: Game::Chunithm,
        name,
        major,
        minor,
        aliases,
    }
}

/// maimai releases, oldest first. Ordinals follow the LXNS version code.
pub(crate) static MAIMAI_VERSIONS: &[Version] = &[
    maimai("maimai", 10, 0, &[]),
    maimai("maimai PLUS", 11, 0, &["PLUS"]),
    maimai("GreeN", 12, 0, &[]),
    maimai("GreeN PLUS", 13, 0, &[]),
    maimai("ORANGE", 14, 0, &[]),
    maimai("ORANGE PLUS", 15, 0, &[]),
    maimai("PiNK", 16, 0, &[]),
    maimai("PiNK PLUS", 17, 0, &[]),
    maimai("MURASAKi", 18, 0, &[]),
    maimai("MURASAKi PLUS", 18, 5, &[]),
    maimai("MiLK", 19, 0, &[]),
    maimai("MiLK PLUS", 19, 5, &[]),
    maimai("FiNALE", 19, 9, &[]),
    maimai("DX", 20, 0, &["maimai でらっくす", "maimai DX", "舞萌DX"]),
    maimai("DX PLUS", 20, 5, &["maimai でらっくす PLUS", "maimai DX PLUS"]),
    maimai("Splash", 21, 0, &["舞萌DX 2021"]),
    maimai("Splash PLUS", 21, 5, &[]),
    maimai("UNiVERSE", 22, 0, &["舞萌DX 2022"]),
    maimai("UNiVERSE PLUS", 22, 5, &[]),
    maimai("FESTiVAL", 23, 0, &["舞萌DX 2023"]),
    maimai("FESTiVAL PLUS", 23, 5, &[]),
    maimai("BUDDiES", 24, 0, &["舞萌DX 2024"]),
    maimai("BUDDiES PLUS", 24, 5, &[]),
    maimai("PRiSM", 25, 0, &["舞萌DX 2025"]),
    maimai("PRiSM PLUS", 25, 5, &[]),
];

/// CHUNITHM releases, oldest first.
pub(crate) static CHUNITHM_VERSIONS: &[Version] = &[
    chunithm("CHUNITHM", 10, 0, &[]),
    chunithm("CHUNITHM PLUS", 10, 5, &[]),
    chunithm("AIR", 11, 0, &[]),
    chunithm("AIR PLUS", 11, 5, &[]),
    chunithm("STAR", 12, 0, &[]),
    chunithm("STAR PLUS", 12, 5, &[]),
    chunithm("AMAZON", 13, 0, &[]),
    chunithm("AMAZON PLUS", 13, 5, &[]),
    chunithm("CRYSTAL", 14, 0, &[]),
    chunithm("CRYSTAL PLUS", 14, 5, &[]),
    chunithm("PARADISE", 15, 0, &[]),
    chunithm("PARADISE LOST", 15, 5, &[]),
    chunithm("NEW", 20, 0, &["CHUNITHM NEW!!", "中二节奏2021"]),
    chunithm("NEW PLUS", 20, 5, &["CHUNITHM NEW!! PLUS"]),
    chunithm("SUN", 21, 0, &["中二节奏2022"]),
    chunithm("SUN PLUS", 21, 5, &[]),
    chunithm("LUMINOUS", 22, 0, &["中二节奏2023"]),
    chunithm("LUMINOUS PLUS", 22, 5, &[]),
    chunithm("VERSE", 23, 0, &["中二节奏2024"]),
    chunithm("X-VERSE", 23, 5, &[]),
];

/// Prefixes providers put in front of a release name.
pub(crate) fn name_prefixes(game: Game) -> &'static [&'static str] {
    match game {
        Game::Maimai => &["maimaidx", "maimaiでらっくす", "maimai"],
        Game::Chunithm => &["chunithm"],
    }
}
