pub mod mods;
pub mod ruleset;
