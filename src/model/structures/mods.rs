use tracing::warn;

/// One entry of the mod catalog: a legacy acronym, its wire bitflags and
/// whether it changes the map's difficulty (as opposed to only scaling score).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameModDef {
    pub acronym: &'static str,
    pub bits: u32,
    pub affects_difficulty: bool
}

const fn def(acronym: &'static str, bits: u32, affects_difficulty: bool) -> GameModDef {
    GameModDef {
        acronym,
        bits,
        affects_difficulty
    }
}

/// Full mod catalog in legacy bitflag order.
///
/// Nightcore carries the DoubleTime bit and Perfect the SuddenDeath bit, the
/// same way the server encodes them. Key mods count as difficulty-affecting
/// since they change how a map converts to mania.
pub const MOD_CATALOG: &[GameModDef] = &[
    def("NF", 1, false),
    def("EZ", 1 << 1, true),
    def("TD", 1 << 2, true),
    def("HD", 1 << 3, false),
    def("HR", 1 << 4, true),
    def("SD", 1 << 5, false),
    def("DT", 1 << 6, true),
    def("RX", 1 << 7, false),
    def("HT", 1 << 8, true),
    def("NC", (1 << 9) | (1 << 6), true),
    def("FL", 1 << 10, true),
    def("SO", 1 << 12, false),
    def("AP", 1 << 13, false),
    def("PF", (1 << 14) | (1 << 5), false),
    def("4K", 1 << 15, true),
    def("5K", 1 << 16, true),
    def("6K", 1 << 17, true),
    def("7K", 1 << 18, true),
    def("8K", 1 << 19, true),
    def("FI", 1 << 20, false),
    def("9K", 1 << 24, true),
    def("MR", 1 << 30, false)
];

/// A play's mod set after resolution against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMods {
    mods: Vec<&'static GameModDef>
}

impl ResolvedMods {
    /// Resolves reported acronyms against the catalog. Acronyms with no
    /// match are dropped; the drop is logged so it stays observable.
    pub fn resolve(acronyms: &[String]) -> Self {
        let mut mods = Vec::with_capacity(acronyms.len());

        for acronym in acronyms {
            match MOD_CATALOG.iter().find(|def| def.acronym == acronym) {
                Some(def) => mods.push(def),
                None => warn!("Dropping unknown mod acronym '{acronym}'")
            }
        }

        Self { mods }
    }

    /// Legacy bitflags of the full mod set
    pub fn bits(&self) -> u32 {
        self.mods.iter().fold(0, |acc, def| acc | def.bits)
    }

    /// Legacy bitflags of only the difficulty-affecting subset
    pub fn difficulty_bits(&self) -> u32 {
        self.mods
            .iter()
            .filter(|def| def.affects_difficulty)
            .fold(0, |acc, def| acc | def.bits)
    }

    /// Acronyms of the resolved set, in reported order
    pub fn acronyms(&self) -> Vec<String> {
        self.mods.iter().map(|def| def.acronym.to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}
