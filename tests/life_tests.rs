use texlife::buffers::Slot;
use texlife::config::Config;
use texlife::config::Threading;
use texlife::engine::Phase;
use texlife::engine::SimulationEngine;
use texlife::error::SeedError;
use texlife::present::Palette;
use texlife::seed::SeedPattern;
use texlife::surface::AddressMode;
use texlife::surface::Extent;
use texlife::surface::Surface;

fn engine_with(
    width: u32,
    height: u32,
    address_mode: AddressMode,
) -> anyhow::Result<SimulationEngine> {
    let config = Config {
        threading: Threading::Serial,
        address_mode,
        ..Config::with_lattice(width, height)
    };

    Ok(SimulationEngine::new(&config)?)
}

fn engine(width: u32, height: u32) -> anyhow::Result<SimulationEngine> {
    engine_with(width, height, AddressMode::ClampToEdge)
}

fn latest(engine: &SimulationEngine) -> Vec<String> {
    engine.latest().expect("engine is seeded").to_ascii()
}

#[test]
fn rule_table_on_a_lattice() -> anyhow::Result<()> {
    // Ring around (2, 2), in the order cells are switched on
    let ring = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)];
    let mut engine = engine(5, 5)?;

    for center in [false, true] {
        for n in 0..=8 {
            let mut surface = Surface::new(Extent::new(5, 5))?;
            if center {
                surface.set(2, 2, 255);
            }
            for &(x, y) in &ring[..n] {
                surface.set(x, y, 255);
            }

            engine.seed_surface(surface);
            engine.tick()?;

            let expected = matches!((center, n), (true, 2 | 3) | (false, 3));
            let got = engine.latest().expect("seeded").is_alive(2, 2);

            assert_eq!(got, expected, "center alive: {center}, {n} live neighbors");
        }
    }

    Ok(())
}

#[test]
fn isolated_cell_dies() -> anyhow::Result<()> {
    let mut engine = engine(3, 3)?;
    engine.seed_surface(Surface::from_ascii(&["...", ".#.", "..."]));

    engine.tick()?;

    assert_eq!(engine.latest().expect("seeded").population(), 0);

    Ok(())
}

#[test]
fn block_is_a_still_life() -> anyhow::Result<()> {
    let block = ["......", "......", "..##..", "..##..", "......", "......"];
    let mut engine = engine(6, 6)?;
    engine.seed_surface(Surface::from_ascii(&block));

    for generation in 1..=10 {
        engine.tick()?;
        assert_eq!(latest(&engine), block, "generation {generation}");
    }

    Ok(())
}

#[test]
fn blinker_has_period_two() -> anyhow::Result<()> {
    let horizontal = [".....", ".....", ".###.", ".....", "....."];
    let vertical = [".....", "..#..", "..#..", "..#..", "....."];

    let mut engine = engine(5, 5)?;
    engine.seed_surface(Surface::from_ascii(&horizontal));

    engine.tick()?;
    assert_eq!(latest(&engine), vertical);

    engine.tick()?;
    assert_eq!(latest(&engine), horizontal);

    Ok(())
}

#[test]
fn corner_samples_clamp_to_the_edge() -> anyhow::Result<()> {
    // With clamping, the corner sees (1, 0) twice and (1, 1) once, and is born. Wrapping or a
    // dead border both leave it with two neighbors.
    let rows = [".#..", ".#..", "....", "...."];

    let mut clamped = engine_with(4, 4, AddressMode::ClampToEdge)?;
    clamped.seed_surface(Surface::from_ascii(&rows));
    clamped.tick()?;
    assert!(clamped.latest().expect("seeded").is_alive(0, 0));

    let mut wrapped = engine_with(4, 4, AddressMode::Repeat)?;
    wrapped.seed_surface(Surface::from_ascii(&rows));
    wrapped.tick()?;
    assert!(!wrapped.latest().expect("seeded").is_alive(0, 0));

    // The same pattern inside a dead margin
    let mut bordered = engine(6, 6)?;
    bordered.seed_surface(Surface::from_ascii(&[
        "......", "..#...", "..#...", "......", "......", "......",
    ]));
    bordered.tick()?;
    assert!(!bordered.latest().expect("seeded").is_alive(1, 1));

    Ok(())
}

#[test]
fn seeding_centers_the_pattern() -> anyhow::Result<()> {
    let mut engine = engine(10, 8)?;
    let pattern = SeedPattern::from_ascii(&["#.#", ".#."])?;

    engine.seed(&pattern)?;

    let surface = engine.latest().expect("seeded");
    assert_eq!(surface.population(), 3);
    assert!(surface.is_alive(3, 3));
    assert!(surface.is_alive(5, 3));
    assert!(surface.is_alive(4, 4));

    Ok(())
}

#[test]
fn full_size_pattern_needs_no_padding() -> anyhow::Result<()> {
    let mut engine = engine(2, 2)?;
    engine.seed(&SeedPattern::from_ascii(&["#.", ".#"])?)?;

    assert_eq!(latest(&engine), ["#.", ".#"]);

    Ok(())
}

#[test]
fn oversized_pattern_is_rejected() -> anyhow::Result<()> {
    let mut engine = engine(4, 4)?;
    let pattern = SeedPattern::from_ascii(&["#", "#", "#", "#", "#"])?;

    let err = engine.seed(&pattern).unwrap_err();

    assert!(matches!(err, SeedError::Oversized { .. }));
    assert_eq!(engine.phase(), Phase::AwaitingSeed);

    Ok(())
}

#[test]
fn any_nonzero_gray_is_alive() -> anyhow::Result<()> {
    let mut engine = engine(3, 1)?;
    let pattern = SeedPattern::from_rgb(3, 1, vec![0, 0, 2, 1, 1, 1, 3, 0, 0])?;

    engine.seed(&pattern)?;

    assert_eq!(latest(&engine), [".##"]);

    Ok(())
}

#[test]
fn ticks_alternate_buffers() -> anyhow::Result<()> {
    let mut engine = engine(8, 8)?;
    engine.seed(&SeedPattern::from_ascii(&["###"])?)?;

    for k in 1..=6u64 {
        engine.tick()?;

        let expected = if k % 2 == 0 { Slot::A } else { Slot::B };
        assert_eq!(engine.phase(), Phase::Seeded { active: expected });
        assert_eq!(engine.generation(), k);
    }

    Ok(())
}

#[test]
fn presenter_tracks_the_latest_generation() -> anyhow::Result<()> {
    let mut engine = engine(5, 5)?;
    let palette = Palette::default();

    let blank = engine.present()?;
    assert!(blank.image().pixels().all(|px| *px == palette.dead));

    engine.seed_surface(Surface::from_ascii(&[
        ".....", ".....", ".###.", ".....", ".....",
    ]));
    engine.tick()?;

    let frame = engine.present()?;
    assert!(frame.is_lit(2, 1));
    assert!(frame.is_lit(2, 3));
    assert!(!frame.is_lit(1, 2));
    assert_eq!(frame.image().get_pixel(1, 2), &palette.dead);

    Ok(())
}

#[test]
fn advance_runs_many_generations() -> anyhow::Result<()> {
    let mut engine = engine(5, 5)?;
    engine.seed_surface(Surface::from_ascii(&[
        ".....", ".....", ".###.", ".....", ".....",
    ]));

    engine.advance(7)?;

    assert_eq!(engine.generation(), 7);
    assert_eq!(engine.phase(), Phase::Seeded { active: Slot::B });
    assert_eq!(latest(&engine)[1], "..#..");

    Ok(())
}
