use crate::error::ProcessorError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// One per-play report row, holding both orderings' inputs and the deltas
/// between them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPlay {
    pub map_id: u32,
    pub map_name: String,
    pub combo: u32,
    pub max_combo: u32,
    pub combo_credit: f64,
    pub accuracy: f64,
    pub miss_count: u32,
    pub mods: Vec<String>,
    #[serde(rename = "serverPP")]
    pub server_pp: f64,
    #[serde(rename = "localPP")]
    pub local_pp: f64,
    #[serde(rename = "ppDelta")]
    pub pp_delta: f64,
    pub position_delta: i64,
    /// Named auxiliary values from the performance model
    pub categories: BTreeMap<String, f64>
}

/// The final output of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub username: String,
    #[serde(rename = "totalServerPP")]
    pub total_server_pp: f64,
    #[serde(rename = "totalLocalPP")]
    pub total_local_pp: f64,
    #[serde(rename = "bonusPP")]
    pub bonus_pp: f64,
    /// Report rows ordered by recomputed pp, descending
    pub scores: Vec<DisplayPlay>
}

impl ProfileReport {
    pub fn to_json(&self) -> Result<String, ProcessorError> {
        serde_json::to_string_pretty(self).map_err(|e| ProcessorError::Parse(format!("serializing report: {e}")))
    }

    /// Renders the summary header plus the ranked table.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "Profile:      {}", self.username).ok();
        writeln!(out, "Server total: {:.2}pp", self.total_server_pp).ok();
        writeln!(out, "Local total:  {:.2}pp", self.total_local_pp).ok();
        writeln!(out, "Bonus:        {:.2}pp", self.bonus_pp).ok();
        writeln!(out).ok();
        writeln!(
            out,
            "{:>4} | {:<60} | {:>11} | {:>7} | {:>4} | {:<12} | {:>9} | {:>9} | {:>8} | {:>4}",
            "#", "Map", "Combo", "Acc", "Miss", "Mods", "Server pp", "Local pp", "Δpp", "Δpos"
        )
        .ok();

        for (position, play) in self.scores.iter().enumerate() {
            let mods = if play.mods.is_empty() {
                "-".to_string()
            } else {
                play.mods.join(",")
            };

            writeln!(
                out,
                "{:>4} | {:<60} | {:>5}/{:>5} | {:>6.2}% | {:>4} | {:<12} | {:>9.2} | {:>9.2} | {:>+8.2} | {:>+4}",
                position + 1,
                truncated(&play.map_name, 60),
                play.combo,
                play.max_combo,
                play.accuracy * 100.0,
                play.miss_count,
                mods,
                play.server_pp,
                play.local_pp,
                play.pp_delta,
                play.position_delta
            )
            .ok();
        }

        out
    }
}

fn truncated(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }

    let cut: String = name.chars().take(max_chars - 1).collect();
    format!("{cut}…")
}
