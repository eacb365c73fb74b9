use crate::error::ProcessorError;
use serde::Serialize;

/// Identity of a map for report rows.
#[derive(Debug, Clone, Serialize)]
pub struct MapDescriptor {
    pub map_id: u32,
    pub name: String
}

/// Builds an identity descriptor from cached raw map content.
pub fn descriptor(map_id: u32, raw: &[u8]) -> Result<MapDescriptor, ProcessorError> {
    let map = rosu_map::Beatmap::from_bytes(raw)
        .map_err(|e| ProcessorError::Parse(format!("map {map_id}: {e}")))?;

    Ok(MapDescriptor {
        map_id,
        name: format!("{} - {} [{}]", map.artist, map.title, map.version)
    })
}
