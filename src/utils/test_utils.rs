use crate::{
    api::api_structs::{HitStatistics, PlayBeatmap, PlayRecord},
    beatmap::MapDescriptor,
    model::{ranking::PlaySummary, PlayOutcome},
    report::DisplayPlay
};
use std::collections::BTreeMap;

/// A three-circle osu! map that parses and calculates cleanly.
pub const TEST_MAP: &str = "osu file format v14

[General]
Mode: 0

[Metadata]
Title:Test
Artist:Tester
Version:Normal
BeatmapID:42

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:7
ApproachRate:9
SliderMultiplier:1.4
SliderTickRate:1

[TimingPoints]
0,300,4,2,0,100,1,0

[HitObjects]
256,192,0,1,0,0:0:0:0:
192,192,300,1,0,0:0:0:0:
128,192,600,1,0,0:0:0:0:
";

pub fn generate_play_record(id: u64, map_id: u32, server_pp: f64, mods: &[&str]) -> PlayRecord {
    PlayRecord {
        id,
        pp: server_pp,
        score: 1_000_000,
        max_combo: 100,
        mods: mods.iter().map(|m| m.to_string()).collect(),
        statistics: HitStatistics::default(),
        beatmap: PlayBeatmap { id: map_id }
    }
}

pub fn generate_play_summary(id: u64, server_pp: f64, local_pp: f64) -> PlaySummary {
    PlaySummary {
        id,
        server_pp,
        local_pp
    }
}

pub fn generate_outcome(play_id: u64, map_id: u32, server_pp: f64, local_pp: f64) -> PlayOutcome {
    PlayOutcome {
        play_id,
        descriptor: MapDescriptor {
            map_id,
            name: format!("Artist - Title [{map_id}]")
        },
        server_pp,
        local_pp,
        accuracy: 0.99,
        miss_count: 1,
        combo: 500,
        map_max_combo: 600,
        combo_credit: 500.0 / 600.0,
        mods: vec!["HD".to_string()],
        categories: BTreeMap::new()
    }
}

pub fn generate_display_play(
    map_id: u32,
    map_name: &str,
    server_pp: f64,
    local_pp: f64,
    position_delta: i64
) -> DisplayPlay {
    DisplayPlay {
        map_id,
        map_name: map_name.to_string(),
        combo: 500,
        max_combo: 600,
        combo_credit: 500.0 / 600.0,
        accuracy: 0.99,
        miss_count: 1,
        mods: vec!["HD".to_string()],
        server_pp,
        local_pp,
        pp_delta: local_pp - server_pp,
        position_delta,
        categories: BTreeMap::new()
    }
}
