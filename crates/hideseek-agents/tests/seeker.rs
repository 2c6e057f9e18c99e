use hideseek_agents::{Behavior, Seeker, SeekerConfig, SeekerMode};
use hideseek_core::{AgentKind, TickContext};
use hideseek_nav::{find_path, Grid, GridMut, TileGrid, TilePos};

const SEED: u64 = 0x5EE4;

fn seeker_at(grid: &TileGrid, tile: TilePos, config: SeekerConfig) -> Seeker {
    let rng = TickContext::new(0, SEED).rng_for_agent(AgentKind::Seeker, 0);
    Seeker::new(config, grid.tile_center(tile), rng)
}

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, SEED)
}

fn plain_vision(vision: u32) -> SeekerConfig {
    SeekerConfig {
        vision,
        open_ground_bonus: 0,
        ..SeekerConfig::default()
    }
}

fn teleport(seeker: &mut Seeker, grid: &TileGrid, tile: TilePos) {
    seeker.body_mut().set_position(grid.tile_center(tile));
}

#[test]
fn explores_until_hider_is_in_sight_then_chases_shortest_path() {
    let mut grid = TileGrid::new(10, 10, 4.0);
    let hider = TilePos::new(0, 0);
    let mut seeker = seeker_at(&grid, TilePos::new(9, 9), plain_vision(5));

    let mut tick = 0;
    loop {
        assert!(tick < 20_000, "seeker never spotted the hider");
        let tile = seeker.tile(&grid);
        let dist = tile.manhattan(hider);

        seeker.decide(&ctx(tick), hider, &mut grid);
        if seeker.mode() == SeekerMode::Chasing {
            assert!(dist <= 5, "chasing at distance {dist}");
            let path = seeker.body().path();
            assert_eq!(path.len() as u32, dist);
            assert_eq!(path.back(), Some(hider));
            assert_ne!(path.front(), Some(tile));
            break;
        }
        if !seeker.body().energy().is_recovering() {
            assert!(dist > 5, "still exploring at distance {dist}");
        }

        seeker.advance(&grid);
        tick += 1;
    }
}

#[test]
fn vision_boundary_is_inclusive_both_ways() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    let hider = TilePos::new(0, 0);
    let mut seeker = seeker_at(&grid, TilePos::new(5, 0), plain_vision(5));

    seeker.decide(&ctx(0), hider, &mut grid);
    assert_eq!(seeker.mode(), SeekerMode::Chasing);

    teleport(&mut seeker, &grid, TilePos::new(6, 0));
    seeker.decide(&ctx(1), hider, &mut grid);
    assert_eq!(seeker.mode(), SeekerMode::Exploring);

    teleport(&mut seeker, &grid, TilePos::new(3, 2));
    seeker.decide(&ctx(2), hider, &mut grid);
    assert_eq!(seeker.mode(), SeekerMode::Chasing);
    assert_eq!(seeker.body().path().len(), 5);
}

#[test]
fn vision_depends_on_cover() {
    let grid = TileGrid::from_ascii(
        "\
..........
.TT.......
..........
",
        16.0,
    )
    .expect("layout");
    let seeker = seeker_at(&grid, TilePos::new(0, 0), SeekerConfig::default());
    let cfg = seeker.config().clone();

    let open = seeker.effective_vision(&grid, TilePos::new(0, 0), TilePos::new(5, 0));
    assert_eq!(open, cfg.vision + cfg.open_ground_bonus);

    let both_in_forest = seeker.effective_vision(&grid, TilePos::new(1, 1), TilePos::new(2, 1));
    assert_eq!(both_in_forest, cfg.vision - cfg.concealed_penalty);

    let one_in_forest = seeker.effective_vision(&grid, TilePos::new(0, 0), TilePos::new(2, 1));
    assert_eq!(one_in_forest, cfg.vision);

    let blind = seeker_at(
        &grid,
        TilePos::new(0, 0),
        SeekerConfig {
            concealed_penalty: 100,
            ..SeekerConfig::default()
        },
    );
    let floor = blind.effective_vision(&grid, TilePos::new(1, 1), TilePos::new(2, 1));
    assert_eq!(floor, cfg.min_vision);
}

#[test]
fn chase_recompute_waits_for_cooldown() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    let mut seeker = seeker_at(&grid, TilePos::new(5, 5), SeekerConfig::default());

    seeker.decide(&ctx(0), TilePos::new(5, 7), &mut grid);
    assert_eq!(seeker.mode(), SeekerMode::Chasing);
    assert_eq!(seeker.body().path().back(), Some(TilePos::new(5, 7)));

    seeker.decide(&ctx(1), TilePos::new(6, 7), &mut grid);
    assert_eq!(seeker.body().path().back(), Some(TilePos::new(5, 7)));

    seeker.decide(&ctx(2), TilePos::new(6, 7), &mut grid);
    assert_eq!(seeker.body().path().back(), Some(TilePos::new(6, 7)));
}

#[test]
fn occupied_tile_is_marked_explored() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    let mut seeker = seeker_at(&grid, TilePos::new(2, 3), SeekerConfig::default());

    seeker.decide(&ctx(0), TilePos::new(9, 9), &mut grid);
    assert!(grid.is_explored(TilePos::new(2, 3)));
}

#[test]
fn fully_explored_map_rejects_every_leg() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    for y in 0..10 {
        for x in 0..10 {
            grid.mark_explored(TilePos::new(x, y));
        }
    }
    let mut seeker = seeker_at(&grid, TilePos::new(0, 0), SeekerConfig::default());

    seeker.decide(&ctx(0), TilePos::new(9, 9), &mut grid);
    assert_eq!(seeker.mode(), SeekerMode::Exploring);
    assert!(seeker.body().path().is_empty());
}

#[test]
fn rejected_rounds_still_lead_to_targeted_search() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    for y in 0..10 {
        for x in 0..10 {
            grid.mark_explored(TilePos::new(x, y));
        }
    }
    let config = SeekerConfig::default();
    let rounds = config.explore_rounds_before_target;
    let offsets = config.target_offsets.clone();
    let hider = TilePos::new(9, 9);
    let mut seeker = seeker_at(&grid, TilePos::new(0, 0), config);

    for tick in 0..rounds {
        seeker.decide(&ctx(tick as u64), hider, &mut grid);
        assert!(seeker.body().path().is_empty());
        assert_eq!(seeker.rounds_since_target(), tick + 1);
        seeker.advance(&grid);
    }

    seeker.decide(&ctx(rounds as u64), hider, &mut grid);
    assert_eq!(seeker.rounds_since_target(), 0);
    assert_eq!(grid.explored_count(), 0);
    let goal = seeker.body().path().back().expect("targeted leg");
    assert!(offsets
        .iter()
        .any(|&(dx, dy)| hider.offset(dx, dy) == goal));

    let parked = seeker.body().position();
    seeker.advance(&grid);
    assert_ne!(seeker.body().position(), parked);
}

#[test]
fn overlap_filter_rejects_at_the_ratio() {
    let mut grid = TileGrid::new(101, 1, 16.0);
    let seeker = seeker_at(&grid, TilePos::new(0, 0), SeekerConfig::default());
    assert_eq!(seeker.config().overlap_reject_ratio, 0.39);

    let route = find_path(&grid, TilePos::new(0, 0), TilePos::new(100, 0));
    assert_eq!(route.len(), 100);

    for x in 1..=38 {
        grid.mark_explored(TilePos::new(x, 0));
    }
    assert!(seeker.accepts_route(&grid, &route));

    grid.mark_explored(TilePos::new(39, 0));
    assert!(!seeker.accepts_route(&grid, &route));

    assert!(seeker.accepts_route(&grid, &[]));
}

#[test]
fn targeted_search_clears_memory_and_circles_the_hider() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    grid.mark_explored(TilePos::new(4, 4));
    let config = SeekerConfig {
        explore_rounds_before_target: 0,
        ..SeekerConfig::default()
    };
    let offsets = config.target_offsets.clone();
    let hider = TilePos::new(5, 5);
    let mut seeker = seeker_at(&grid, TilePos::new(0, 9), config);

    seeker.decide(&ctx(0), hider, &mut grid);

    assert_eq!(seeker.mode(), SeekerMode::Exploring);
    assert_eq!(grid.explored_count(), 0);
    let goal = seeker.body().path().back().expect("targeted leg");
    assert!(offsets
        .iter()
        .any(|&(dx, dy)| hider.offset(dx, dy) == goal));
}

#[test]
fn recovery_skips_decisions_then_resets_to_exploring() {
    let mut grid = TileGrid::new(10, 10, 16.0);
    let mut seeker = seeker_at(&grid, TilePos::new(5, 5), SeekerConfig::default());
    seeker.decide(&ctx(0), TilePos::new(5, 7), &mut grid);
    assert_eq!(seeker.mode(), SeekerMode::Chasing);

    seeker.body_mut().set_energy(0.0);
    let far = TilePos::new(0, 0);
    let parked = seeker.body().position();
    let mut tick = 1;
    seeker.decide(&ctx(tick), far, &mut grid);
    while seeker.body().energy().is_recovering() {
        assert_eq!(seeker.mode(), SeekerMode::Chasing);
        seeker.advance(&grid);
        assert_eq!(seeker.body().position(), parked);

        tick += 1;
        assert!(tick < 1_000);
        seeker.decide(&ctx(tick), far, &mut grid);
    }
    assert_eq!(seeker.mode(), SeekerMode::Exploring);
}
