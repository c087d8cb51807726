//! delve - seeded dungeon crawler with a first-person terminal view
//!
//! Main entry point.

use std::fs;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use delve_core::dungeon::{GeneratorConfig, LevelGenerator};
use delve_core::MAX_DUNGEON_DEPTH;
use delve_tui::renderer::RenderConfig;
use delve_tui::{App, FirstPersonRenderer, PaletteTable};

/// Explore a procedurally generated dungeon
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "delve - descend into the seed", long_about = None)]
struct Args {
    /// Seed string; the same seed always builds the same dungeon
    #[arg(short, long, default_value = "delve")]
    seed: String,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f64,

    /// Path to a JSON palette table overriding the built-in theme colors
    #[arg(long)]
    palette: Option<String>,

    /// Deepest level of the dungeon
    #[arg(long, default_value_t = MAX_DUNGEON_DEPTH)]
    max_depth: u32,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.max_depth == 0 {
        eprintln!("--max-depth must be at least 1");
        std::process::exit(2);
    }
    if !(20.0..=170.0).contains(&args.fov) {
        eprintln!("--fov must be between 20 and 170 degrees");
        std::process::exit(2);
    }

    // Load palette overrides before touching the terminal
    let palettes = match &args.palette {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            PaletteTable::from_json(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => PaletteTable::default(),
    };

    let config = GeneratorConfig {
        max_depth: args.max_depth,
        ..GeneratorConfig::default()
    };
    let generator = LevelGenerator::with_config(args.seed.clone(), config);

    let render_config = RenderConfig {
        fov: args.fov.to_radians(),
        ..RenderConfig::default()
    };
    let mut renderer = FirstPersonRenderer::with_config(render_config);
    renderer.set_palettes(palettes);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(generator, renderer);

    // Main loop
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            if let Some(command) = app.handle_event(event) {
                app.execute(command);
            }
            if app.should_quit() {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
