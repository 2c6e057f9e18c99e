use hideseek_agents::{Body, EnergyConfig};
use hideseek_core::AgentKind;
use hideseek_nav::{find_path, Grid, Obstacle, TileGrid, TilePos};

fn body_at(grid: &TileGrid, tile: TilePos, cfg: EnergyConfig) -> Body {
    Body::new(AgentKind::Seeker, grid.tile_center(tile), cfg)
}

#[test]
fn advance_consumes_path_in_order_and_lands_on_goal() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    grid.set_obstacle(TilePos::new(1, 0), Some(Obstacle::Rock));
    let start = TilePos::new(0, 0);
    let goal = TilePos::new(3, 2);

    let route = find_path(&grid, start, goal);
    assert!(!route.is_empty());

    let mut body = body_at(&grid, start, EnergyConfig::default());
    body.set_path(route.clone());

    let mut consumed = Vec::new();
    for _ in 0..1_000 {
        if body.path().is_empty() {
            break;
        }
        if let Some(tile) = body.advance(&grid) {
            consumed.push(tile);
        }
    }

    assert_eq!(consumed, route);
    assert_eq!(body.tile(&grid), goal);
    assert_eq!(body.position(), grid.tile_center(goal));
}

#[test]
fn fast_body_pops_one_waypoint_per_tick() {
    let grid = TileGrid::new(8, 1, 4.0);
    let cfg = EnergyConfig {
        base_speed: 6.0,
        ..EnergyConfig::default()
    };
    let mut body = body_at(&grid, TilePos::new(0, 0), cfg);
    body.set_path(find_path(&grid, TilePos::new(0, 0), TilePos::new(7, 0)));

    for expected in 1..=7 {
        assert_eq!(body.advance(&grid), Some(TilePos::new(expected, 0)));
        assert_eq!(body.position(), grid.tile_center(TilePos::new(expected, 0)));
    }
    assert!(body.path().is_empty());
    assert_eq!(body.advance(&grid), None);
}

#[test]
fn waypoint_under_the_body_is_popped_without_moving() {
    let grid = TileGrid::new(3, 3, 16.0);
    let here = TilePos::new(1, 1);
    let mut body = body_at(&grid, here, EnergyConfig::default());
    body.set_path(vec![here, TilePos::new(2, 1)]);

    assert_eq!(body.advance(&grid), Some(here));
    assert_eq!(body.position(), grid.tile_center(here));
    assert_eq!(body.path().front(), Some(TilePos::new(2, 1)));
}

#[test]
fn slow_step_moves_exactly_speed_units() {
    let grid = TileGrid::new(3, 1, 16.0);
    let mut body = body_at(&grid, TilePos::new(0, 0), EnergyConfig::default());
    body.set_path(vec![TilePos::new(1, 0)]);

    let before = body.position();
    assert_eq!(body.advance(&grid), None);
    assert!((before.distance(body.position()) - body.speed()).abs() < 1e-5);
}

#[test]
fn halt_drops_path_and_speed() {
    let grid = TileGrid::new(4, 4, 16.0);
    let mut body = body_at(&grid, TilePos::new(0, 0), EnergyConfig::default());
    body.set_path(find_path(&grid, TilePos::new(0, 0), TilePos::new(3, 3)));

    body.halt();
    assert!(body.path().is_empty());
    assert_eq!(body.speed(), 0.0);
    let before = body.position();
    assert_eq!(body.advance(&grid), None);
    assert_eq!(body.position(), before);
}
