//! Castle layout loader.
//!
//! Loads the room grid, entrances, and shortcuts from RON files. Items and
//! enemies are scattered separately by the factory.

use std::path::Path;

use castle_core::CastleLayout;

use crate::loaders::{LoadResult, read_file};

/// Loader for castle layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a castle layout from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a CastleLayout
    pub fn load(path: &Path) -> LoadResult<CastleLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a layout. Structural checks (dangling links, start and boss
    /// placement) happen when the layout is built into a map.
    pub fn parse(content: &str) -> LoadResult<CastleLayout> {
        let layout: CastleLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse castle layout RON: {}", e))?;

        if layout.room_count() == 0 {
            anyhow::bail!("Castle layout has no rooms");
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_core::{CardinalDirection, EntranceSpec, GridPos};

    #[test]
    fn parses_holes_links_and_shortcuts() {
        let layout = MapLoader::parse(
            r#"(
                rows: [
                    [Some((name: "Gate", east: Open)), None],
                    [Some((
                        name: "Cellar",
                        north: To((row: 0, col: 0)),
                        shortcuts: [(at: (row: 1, col: 1), to: (row: 0, col: 0))],
                    ))],
                ],
                start: (row: 0, col: 0),
                boss: (row: 1, col: 0),
            )"#,
        )
        .unwrap();

        assert_eq!(layout.room_count(), 2);
        let cellar = layout.spec_at(GridPos::new(1, 0)).unwrap();
        assert_eq!(
            cellar.entrance(CardinalDirection::North),
            EntranceSpec::To(GridPos::new(0, 0))
        );
        assert_eq!(cellar.entrance(CardinalDirection::South), EntranceSpec::Closed);
        assert_eq!(cellar.shortcuts.len(), 1);
    }

    #[test]
    fn empty_layout_is_rejected() {
        let err = MapLoader::parse("(rows: [[None]], start: (row: 0, col: 0), boss: (row: 0, col: 0))")
            .unwrap_err();
        assert_eq!(err.to_string(), "Castle layout has no rooms");
    }
}
