//! Per-mode frame handlers
//!
//! The outer loop calls `App::frame` once per iteration; exactly one
//! handler runs based on the current mode. Handlers poll input, advance
//! the simulation, draw, and play cues - the sim itself stays headless.
//!
//! Screen coordinates are plain f32 pairs at the draw boundary; the sim's
//! `glam::Vec2` world positions are converted by the camera only here.

use glam::Vec2;
use macroquad::color::{BLACK, Color, DARKGRAY, GREEN, RED, WHITE};
use macroquad::input::{
    KeyCode, MouseButton, get_char_pressed, is_key_down, is_key_pressed, is_mouse_button_down,
    is_mouse_button_pressed, is_quit_requested, mouse_position,
};
use macroquad::shapes::draw_rectangle;
use macroquad::text::{draw_text, measure_text};
use macroquad::texture::{DrawTextureParams, draw_texture, draw_texture_ex};
use macroquad::window::{clear_background, screen_height, screen_width};

use crate::assets::{Assets, Sprite, facing_row};
use crate::audio::SoundBank;
use crate::highscores::HighScores;
use crate::map::MapData;
use crate::sim::{EventOutcome, GameMode, GameState, ModeEvent, TickInput, tick};

/// Distance of the gun sprite from the player center
const GUN_DISTANCE: f32 = 50.0;

/// Everything the outer loop owns
pub struct App {
    pub state: GameState,
    pub map: MapData,
    pub assets: Assets,
    pub sounds: SoundBank,
    pub scores: HighScores,
    /// The loop runs while this holds
    pub running: bool,
}

impl App {
    pub fn new(
        state: GameState,
        map: MapData,
        assets: Assets,
        sounds: SoundBank,
        scores: HighScores,
    ) -> Self {
        if state.config.play_music {
            sounds.start_music();
        }
        Self {
            state,
            map,
            assets,
            sounds,
            scores,
            running: true,
        }
    }

    /// One outer-loop iteration: dispatch to the current mode's handler
    pub fn frame(&mut self, dt: f32) {
        if is_quit_requested() {
            let outcome = self.state.handle_event(ModeEvent::CloseRequested);
            self.apply_outcome(outcome);
            return;
        }

        match self.state.mode {
            GameMode::Menu => self.frame_menu(),
            GameMode::Playing => self.frame_playing(dt),
            GameMode::Paused => self.frame_paused(),
            GameMode::GameOver => self.frame_game_over(dt),
            GameMode::EnterName => self.frame_enter_name(),
        }
    }

    fn apply_outcome(&mut self, outcome: EventOutcome) {
        match outcome {
            EventOutcome::Continue => {}
            EventOutcome::Terminate => self.running = false,
            EventOutcome::Submit(entry) => {
                self.scores.submit(entry);
                if let Err(err) = self.scores.save(&self.state.config.highscore_path) {
                    log::error!("Failed to save high scores: {err}");
                }
            }
        }
    }

    // === Menu ===

    fn frame_menu(&mut self) {
        clear_background(BLACK);

        let cx = screen_width() / 2.0;
        draw_centered("NIGHT SWARM", cx, screen_height() / 4.0, 100.0, WHITE);

        let bw = 200.0;
        let bh = 50.0;
        let bx = cx - bw / 2.0;
        let start = button("Start", bx, screen_height() / 2.0, bw, bh, GREEN);
        let quit = button("Quit", bx, screen_height() / 2.0 + 60.0, bw, bh, RED);

        draw_centered("High Scores", cx, screen_height() - 150.0, 50.0, WHITE);
        for (i, entry) in self.scores.top().iter().enumerate() {
            let line = format!("{}. {} - {}", i + 1, entry.name, entry.score);
            draw_centered(&line, cx, screen_height() - 100.0 + i as f32 * 30.0, 40.0, WHITE);
        }

        if start {
            let outcome = self.state.handle_event(ModeEvent::StartPressed);
            self.apply_outcome(outcome);
            log::info!("Round started (seed {})", self.state.seed);
        } else if quit {
            let outcome = self.state.handle_event(ModeEvent::QuitPressed);
            self.apply_outcome(outcome);
        }
    }

    // === Playing ===

    fn frame_playing(&mut self, dt: f32) {
        if is_key_pressed(KeyCode::Escape) {
            let outcome = self.state.handle_event(ModeEvent::PauseToggled);
            self.apply_outcome(outcome);
            return;
        }

        let input = self.gather_input();
        let events = tick(&mut self.state, &input, dt);
        self.sounds.play_tick_events(&events);

        self.draw_world();
        self.draw_hud();
    }

    fn gather_input(&self) -> TickInput {
        let mut move_dir = Vec2::ZERO;
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            move_dir.y -= 1.0;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            move_dir.y += 1.0;
        }
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            move_dir.x -= 1.0;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            move_dir.x += 1.0;
        }

        let (mx, my) = mouse_position();
        let offset = self.camera_offset();
        TickInput {
            move_dir,
            aim_point: Vec2::new(mx, my) - offset,
            fire_held: is_mouse_button_down(MouseButton::Left),
        }
    }

    /// World-to-screen translation keeping the player centered
    fn camera_offset(&self) -> Vec2 {
        Vec2::new(screen_width() / 2.0, screen_height() / 2.0) - self.state.player.pos
    }

    fn draw_world(&self) {
        clear_background(BLACK);
        let offset = self.camera_offset();
        let tile = self.state.config.tile_size;

        // Ground layer, culled to the visible tile range
        let first_col = ((-offset.x / tile).floor().max(0.0)) as usize;
        let first_row = ((-offset.y / tile).floor().max(0.0)) as usize;
        let cols = (screen_width() / tile).ceil() as usize + 2;
        let rows = (screen_height() / tile).ceil() as usize + 2;
        for (y, row) in self.map.ground.iter().enumerate().skip(first_row).take(rows) {
            for (x, id) in row.iter().enumerate().skip(first_col).take(cols) {
                draw_texture_ex(
                    &self.assets.tiles.texture,
                    x as f32 * tile + offset.x,
                    y as f32 * tile + offset.y,
                    WHITE,
                    DrawTextureParams {
                        source: Some(macroquad::math::Rect::new(
                            *id as f32 * tile,
                            0.0,
                            tile,
                            tile,
                        )),
                        ..Default::default()
                    },
                );
            }
        }

        // Obstacle sprites sit at their map rects
        for object in &self.map.objects {
            if let Some(sprite) = self.assets.objects.get(&object.sprite) {
                draw_texture(&sprite.texture, object.x + offset.x, object.y + offset.y, WHITE);
            }
        }

        for bullet in &self.state.bullets {
            draw_centered_sprite(&self.assets.bullet, bullet.pos + offset);
        }

        for enemy in &self.state.enemies {
            let frames = &self.assets.enemies[enemy.kind].frames;
            let frame = self.state.enemy_frame(enemy) % frames.len();
            draw_centered_sprite(&frames[frame], enemy.pos + offset);
        }

        self.draw_player(offset);
        self.draw_gun(offset);
    }

    fn draw_player(&self, offset: Vec2) {
        let player = &self.state.player;
        let frames = &self.assets.player[facing_row(player.facing)];
        let frame = if player.moving {
            (player.anim_time * self.state.config.animation_fps) as usize % frames.len()
        } else {
            0
        };
        draw_centered_sprite(&frames[frame], player.pos + offset);
    }

    fn draw_gun(&self, offset: Vec2) {
        let player = &self.state.player;
        let pos = player.pos + player.aim * GUN_DISTANCE + offset;
        let sprite = &self.assets.gun;
        draw_texture_ex(
            &sprite.texture,
            pos.x - sprite.width / 2.0,
            pos.y - sprite.height / 2.0,
            WHITE,
            DrawTextureParams {
                rotation: player.aim.y.atan2(player.aim.x),
                flip_y: player.aim.x < 0.0,
                ..Default::default()
            },
        );
    }

    fn draw_hud(&self) {
        let heart = &self.assets.heart;
        for i in 0..self.state.player.health.max(0) {
            draw_texture(
                &heart.texture,
                10.0 + i as f32 * (heart.width + 4.0),
                10.0,
                WHITE,
            );
        }

        let score_text = format!("Score: {}", self.state.session.score);
        let metrics = measure_text(&score_text, None, 40, 1.0);
        draw_text(
            &score_text,
            screen_width() - metrics.width - 20.0,
            10.0 + metrics.offset_y,
            40.0,
            WHITE,
        );
    }

    // === Paused ===

    fn frame_paused(&mut self) {
        if is_key_pressed(KeyCode::Escape) {
            let outcome = self.state.handle_event(ModeEvent::PauseToggled);
            self.apply_outcome(outcome);
            return;
        }

        // The frozen world stays visible behind the overlay
        self.draw_world();
        self.draw_hud();
        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.0, 0.0, 0.0, 0.6),
        );

        let cx = screen_width() / 2.0;
        draw_centered("Paused", cx, screen_height() / 3.0, 80.0, WHITE);

        let bw = 200.0;
        let bh = 50.0;
        let bx = cx - bw / 2.0;
        if button("Resume", bx, screen_height() / 2.0, bw, bh, GREEN) {
            let outcome = self.state.handle_event(ModeEvent::PauseToggled);
            self.apply_outcome(outcome);
        } else if button("Menu", bx, screen_height() / 2.0 + 60.0, bw, bh, DARKGRAY) {
            let outcome = self.state.handle_event(ModeEvent::ReturnToMenu);
            self.apply_outcome(outcome);
        }
    }

    // === Game over ===

    fn frame_game_over(&mut self, dt: f32) {
        // Input is frozen for the banner's duration; drain buffered
        // characters so they cannot leak into name entry
        while get_char_pressed().is_some() {}

        clear_background(BLACK);
        draw_centered(
            "Game Over",
            screen_width() / 2.0,
            screen_height() / 2.0,
            100.0,
            WHITE,
        );

        self.state.advance_game_over(dt * 1000.0);
    }

    // === Name entry ===

    fn frame_enter_name(&mut self) {
        let max_len = self.state.config.max_name_len;
        while let Some(c) = get_char_pressed() {
            self.state.session.push_name_char(c, max_len);
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.state.session.pop_name_char();
        }
        if is_key_pressed(KeyCode::Enter) {
            let outcome = self.state.handle_event(ModeEvent::NameConfirmed);
            self.apply_outcome(outcome);
            if self.state.mode == GameMode::Menu {
                return;
            }
        }

        clear_background(BLACK);
        let cx = screen_width() / 2.0;
        let prompt = format!(
            "Your Score: {}. Enter your name ({} chars):",
            self.state.session.score, max_len
        );
        draw_centered(&prompt, cx, screen_height() / 2.0 - 100.0, 60.0, WHITE);
        draw_centered(
            &self.state.session.player_name,
            cx,
            screen_height() / 2.0,
            80.0,
            WHITE,
        );
    }
}

/// Draw a sprite with its center at `pos`
fn draw_centered_sprite(sprite: &Sprite, pos: Vec2) {
    draw_texture(
        &sprite.texture,
        pos.x - sprite.width / 2.0,
        pos.y - sprite.height / 2.0,
        WHITE,
    );
}

/// Text centered horizontally on `cx` with its baseline near `cy`
fn draw_centered(text: &str, cx: f32, cy: f32, font_size: f32, color: Color) {
    let metrics = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, cx - metrics.width / 2.0, cy, font_size, color);
}

/// Immediate-mode button; true when clicked this frame
fn button(label: &str, x: f32, y: f32, w: f32, h: f32, color: Color) -> bool {
    let (mx, my) = mouse_position();
    let hovered = mx >= x && mx <= x + w && my >= y && my <= y + h;
    let fill = if hovered {
        Color::new(
            (color.r + 0.2).min(1.0),
            (color.g + 0.2).min(1.0),
            (color.b + 0.2).min(1.0),
            1.0,
        )
    } else {
        color
    };
    draw_rectangle(x, y, w, h, fill);
    let metrics = measure_text(label, None, 50, 1.0);
    draw_text(
        label,
        x + (w - metrics.width) / 2.0,
        y + (h + metrics.offset_y) / 2.0,
        50.0,
        WHITE,
    );
    hovered && is_mouse_button_pressed(MouseButton::Left)
}
