//! End-to-end frame tests: generate a dungeon, walk it headlessly and
//! render frames into an in-memory surface.

use delve_core::dungeon::{Direction, LevelGenerator};
use delve_tui::app::Command;
use delve_tui::{App, FirstPersonRenderer, MemorySurface};

fn new_app(seed: &str) -> App {
    App::new(LevelGenerator::new(seed), FirstPersonRenderer::new())
}

#[test]
fn test_render_current_level_after_walking() {
    let mut app = new_app("frames");
    let renderer = FirstPersonRenderer::new();

    // Walk a few steps in whatever directions are open
    for _ in 0..20 {
        let level = app.current_level();
        let pose = *app.pose();
        let open = Direction::ALL.into_iter().find(|d| {
            let (dx, dy) = d.delta();
            level.is_traversable(pose.x + dx, pose.y + dy)
        });
        match open {
            Some(_) => {
                app.execute(Command::TurnRight);
                app.execute(Command::StepForward);
            }
            None => break,
        }
    }

    let mut surface = MemorySurface::new(80, 24);
    renderer
        .render(app.current_level(), app.pose(), &mut surface)
        .unwrap();

    // Every cell drawn, no panic anywhere along the walk
    for y in 0..24 {
        for x in 0..80 {
            assert!(surface.char_at(x, y).is_some());
            assert_ne!(surface.char_at(x, y), Some(' '));
        }
    }
}

#[test]
fn test_same_seed_same_first_frame() {
    let a = new_app("stable");
    let b = new_app("stable");
    let renderer = FirstPersonRenderer::new();

    let mut fa = MemorySurface::new(64, 20);
    let mut fb = MemorySurface::new(64, 20);
    renderer.render(a.current_level(), a.pose(), &mut fa).unwrap();
    renderer.render(b.current_level(), b.pose(), &mut fb).unwrap();

    for y in 0..20 {
        for x in 0..64 {
            assert_eq!(fa.char_at(x, y), fb.char_at(x, y));
            assert_eq!(fa.color_at(x, y), fb.color_at(x, y));
        }
    }
}

#[test]
fn test_full_descent_to_the_boss() {
    let mut app = new_app("descent");

    // Teleporting straight down the staircases must reach the boss level
    for depth in 1..delve_core::MAX_DUNGEON_DEPTH {
        let down = app
            .current_level()
            .stairs_down
            .unwrap_or_else(|| panic!("depth {depth} has no stairs down"));
        // Stand on the staircase and take it
        let pose = app.pose();
        assert_eq!(pose.level, depth);
        app.warp_to(down);
        app.execute(Command::Descend);
    }

    assert_eq!(app.pose().level, delve_core::MAX_DUNGEON_DEPTH);
    assert!(app.current_level().boss.is_some());
    assert!(app.current_level().stairs_down.is_none());
}
