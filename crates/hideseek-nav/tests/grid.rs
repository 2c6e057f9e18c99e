use hideseek_nav::{Biome, Grid, GridError, GridMut, Obstacle, TileGrid, TilePos, Vec2};

const LAYOUT: &str = "\
..T~
.RT.

....
";

#[test]
fn parses_layout_and_reports_tile_attributes() {
    let grid = TileGrid::from_ascii(LAYOUT, 16.0).expect("layout parses");
    assert_eq!(grid.dimensions(), (4, 3));

    let tree = grid.tile_info(TilePos::new(2, 0)).unwrap();
    assert_eq!(tree.obstacle, Some(Obstacle::Tree));
    assert_eq!(tree.biome, Biome::Forest);
    assert!(tree.walkable);
    assert!(tree.conceals());

    let water = grid.tile_info(TilePos::new(3, 0)).unwrap();
    assert_eq!(water.biome, Biome::Lake);
    assert!(!water.walkable);

    let rock = grid.tile_info(TilePos::new(1, 1)).unwrap();
    assert_eq!(rock.biome, Biome::Rocky);
    assert!(!grid.is_walkable(TilePos::new(1, 1)));

    let open = grid.tile_info(TilePos::new(0, 2)).unwrap();
    assert_eq!(open.biome, Biome::Grassland);
    assert!(!open.conceals());

    assert_eq!(grid.tile_info(TilePos::new(4, 0)), None);
    assert!(!grid.is_walkable(TilePos::new(-1, 0)));

    assert_eq!(grid.to_string(), "..T~\n.RT.\n....\n");
}

#[test]
fn rejects_malformed_layouts() {
    assert_eq!(TileGrid::from_ascii("\n\n", 16.0).unwrap_err(), GridError::Empty);
    assert_eq!(
        TileGrid::from_ascii("...\n..\n", 16.0).unwrap_err(),
        GridError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        TileGrid::from_ascii("..\n.x\n", 16.0).unwrap_err(),
        GridError::UnknownGlyph {
            glyph: 'x',
            line: 2,
            column: 2
        }
    );
    assert!(matches!(
        TileGrid::from_ascii("..", 0.0),
        Err(GridError::InvalidTileSize(_))
    ));
}

#[test]
fn tile_of_and_tile_center_agree() {
    let grid = TileGrid::new(10, 10, 16.0);
    let tile = TilePos::new(3, 7);
    let center = grid.tile_center(tile);

    assert_eq!(center, Vec2::new(56.0, 120.0));
    assert_eq!(grid.tile_of(center), tile);
    assert_eq!(grid.tile_of(Vec2::new(47.99, 112.0)), TilePos::new(2, 7));
}

#[test]
fn explored_marks_can_be_set_and_cleared() {
    let mut grid = TileGrid::new(3, 3, 16.0);
    grid.mark_explored(TilePos::new(1, 1));
    grid.mark_explored(TilePos::new(2, 1));
    grid.mark_explored(TilePos::new(9, 9));

    assert!(grid.is_explored(TilePos::new(1, 1)));
    assert_eq!(grid.explored_count(), 2);

    grid.clear_explored();
    assert_eq!(grid.explored_count(), 0);
    assert!(!grid.is_explored(TilePos::new(1, 1)));
}

#[test]
fn walkable_tiles_skip_blocked_cells() {
    let grid = TileGrid::from_ascii("R.\n~T\n", 16.0).unwrap();
    let tiles: Vec<TilePos> = grid.walkable_tiles().collect();
    assert_eq!(tiles, vec![TilePos::new(1, 0), TilePos::new(1, 1)]);
}
