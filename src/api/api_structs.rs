use serde::Deserialize;

/// Response of the client-credentials token exchange
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Expire time in seconds
    pub expires_in: u64
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: u32,
    pub username: String,
    pub statistics: UserStatistics
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserStatistics {
    /// The server's authoritative total pp for the profile
    pub pp: f64
}

/// One raw top play as reported by the service. Fetched once, read-only.
///
/// The schema is deliberately strict: a record missing any of these fields
/// fails deserialization at the boundary instead of defaulting silently.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayRecord {
    pub id: u64,
    /// Server-reported pp for this play
    pub pp: f64,
    pub score: u64,
    pub max_combo: u32,
    /// Mod acronyms as reported, e.g. ["HD", "DT"]
    pub mods: Vec<String>,
    pub statistics: HitStatistics,
    pub beatmap: PlayBeatmap
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayBeatmap {
    pub id: u32
}

/// Per-category hit counts of a play.
///
/// geki/katu/50 are reported as null for rulesets they don't apply to, so
/// those three are optional and read as zero downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitStatistics {
    pub count_geki: Option<u32>,
    pub count_300: u32,
    pub count_katu: Option<u32>,
    pub count_100: u32,
    pub count_50: Option<u32>,
    pub count_miss: u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORE_JSON: &str = r#"{
        "id": 4171855,
        "pp": 327.21,
        "score": 33492867,
        "max_combo": 909,
        "mods": ["HD", "DT"],
        "statistics": {
            "count_geki": 201,
            "count_300": 610,
            "count_katu": 9,
            "count_100": 12,
            "count_50": 0,
            "count_miss": 3
        },
        "beatmap": { "id": 129891 }
    }"#;

    #[test]
    fn test_play_record_deserializes() {
        let record: PlayRecord = serde_json::from_str(SCORE_JSON).unwrap();

        assert_eq!(record.beatmap.id, 129891);
        assert_eq!(record.mods, vec!["HD", "DT"]);
        assert_eq!(record.statistics.count_300, 610);
        assert_eq!(record.statistics.count_miss, 3);
    }

    #[test]
    fn test_play_record_missing_pp_is_rejected() {
        let json = SCORE_JSON.replacen("\"pp\": 327.21,", "", 1);

        assert!(serde_json::from_str::<PlayRecord>(&json).is_err());
    }

    #[test]
    fn test_null_katu_reads_as_none() {
        let json = SCORE_JSON.replacen("\"count_katu\": 9", "\"count_katu\": null", 1);
        let record: PlayRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.statistics.count_katu, None);
    }
}
