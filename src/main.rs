//! Night Swarm entry point
//!
//! Loads the map and assets (fatal on failure), then runs the outer loop:
//! one mode handler per iteration until the running flag drops.

use macroquad::input::prevent_quit;
use macroquad::time::get_frame_time;
use macroquad::window::{Conf, next_frame};

use night_swarm::app::App;
use night_swarm::assets::Assets;
use night_swarm::audio::SoundBank;
use night_swarm::config::Config;
use night_swarm::highscores::HighScores;
use night_swarm::map::MapData;
use night_swarm::sim::GameState;

fn window_conf() -> Conf {
    let config = Config::default();
    Conf {
        window_title: "Night Swarm".to_string(),
        window_width: config.window_width,
        window_height: config.window_height,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Night Swarm starting...");

    let config = Config::default();

    let map = match MapData::load(&config.map_path) {
        Ok(map) => map,
        Err(err) => {
            log::error!("Cannot load map {}: {err}", config.map_path.display());
            return;
        }
    };

    let assets = match Assets::load(&config.asset_dir, &map) {
        Ok(assets) => assets,
        Err(err) => {
            log::error!("Cannot load assets from {}: {err}", config.asset_dir.display());
            return;
        }
    };

    let sounds = match SoundBank::load(&config.asset_dir).await {
        Ok(sounds) => sounds,
        Err(err) => {
            log::error!("Cannot load audio from {}: {err}", config.asset_dir.display());
            return;
        }
    };

    let scores = HighScores::load(&config.highscore_path);

    let masks = assets.mask_set();
    let round = map.round_setup(config.tile_size);
    let seed = macroquad::miniquad::date::now() as u64;
    let state = GameState::new(config, round, masks, seed);

    // Route the window-close signal through the mode state machine
    prevent_quit();

    let mut app = App::new(state, map, assets, sounds, scores);
    while app.running {
        app.frame(get_frame_time());
        next_frame().await;
    }

    log::info!("Night Swarm shut down");
}
