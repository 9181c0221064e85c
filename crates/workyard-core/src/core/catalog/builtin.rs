use phf::{Map, phf_map};

pub const PLACEHOLDER_IMAGE: &str = "/images/workstations/placeholder.svg";

pub(crate) struct BuiltinPiece {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    pub can_rotate: bool,
    pub locations: &'static [&'static str],
}

pub(crate) static BUILTIN_PIECES: &[BuiltinPiece] = &[
    // Workyard
    BuiltinPiece {
        name: "Stone Cutter",
        width: 2,
        height: 1,
        can_rotate: true,
        locations: &["workyard"],
    },
    BuiltinPiece {
        name: "Sawing Spot",
        width: 2,
        height: 1,
        can_rotate: true,
        locations: &["workyard"],
    },
    BuiltinPiece {
        name: "Wood Cutting Spot",
        width: 1,
        height: 1,
        can_rotate: false,
        locations: &["workyard"],
    },
    // Garden
    BuiltinPiece {
        name: "Garden Bed",
        width: 1,
        height: 1,
        can_rotate: false,
        locations: &["garden"],
    },
    BuiltinPiece {
        name: "Compost Heap",
        width: 1,
        height: 1,
        can_rotate: false,
        locations: &["garden"],
    },
    // Morgue
    BuiltinPiece {
        name: "Dissection Table",
        width: 2,
        height: 1,
        can_rotate: true,
        locations: &["morgue"],
    },
    BuiltinPiece {
        name: "Autopsy Table",
        width: 2,
        height: 1,
        can_rotate: true,
        locations: &["morgue"],
    },
    BuiltinPiece {
        name: "Preparation Place",
        width: 1,
        height: 1,
        can_rotate: false,
        locations: &["morgue"],
    },
];

static LOCATION_GRIDS: Map<&'static str, (usize, usize)> = phf_map! {
    "workyard" => (8, 8),
    "garden" => (6, 6),
    "morgue" => (7, 7),
};

/// Grid `(width, height)` of a named location.
pub fn location_grid_size(location: &str) -> Option<(usize, usize)> {
    LOCATION_GRIDS.get(location.trim()).copied()
}

/// All known location names, sorted.
pub fn known_locations() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = LOCATION_GRIDS.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_grid_size_knows_every_location() {
        assert_eq!(location_grid_size("workyard"), Some((8, 8)));
        assert_eq!(location_grid_size("garden"), Some((6, 6)));
        assert_eq!(location_grid_size(" morgue "), Some((7, 7)));
        assert_eq!(location_grid_size("church"), None);
    }

    #[test]
    fn known_locations_are_sorted() {
        assert_eq!(known_locations(), vec!["garden", "morgue", "workyard"]);
    }

    #[test]
    fn every_builtin_piece_is_listed_in_a_known_location() {
        for piece in BUILTIN_PIECES {
            assert!(piece.width >= 1 && piece.height >= 1, "{}", piece.name);
            assert!(
                piece
                    .locations
                    .iter()
                    .all(|l| location_grid_size(l).is_some()),
                "{}",
                piece.name
            );
        }
    }
}
