//! Update/draw loop
//!
//! One owned [`GameState`] is advanced by an update step every frame, and a
//! renderer is handed the finished snapshot at a fixed draw rate.

use glam::Vec2;

use crate::consts::*;
use crate::input::{Viewport, pointer_down};
use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, closest_battery, fire, tick};
use crate::{distance, unit_direction};

/// Demo player: fires at the rocket nearest the ground
#[derive(Debug, Clone)]
pub struct Autopilot {
    cooldown_ms: f64,
    last_fire_ms: f64,
}

impl Autopilot {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            last_fire_ms: f64::NEG_INFINITY,
        }
    }

    /// Pick an aim point, if any rocket is worth shooting at
    pub fn choose_target(state: &GameState) -> Option<Vec2> {
        let mut rockets: Vec<_> = state.rockets.iter().collect();
        rockets.sort_by(|a, b| b.current.y.total_cmp(&a.current.y));

        for rocket in rockets {
            let battery_x = closest_battery(state, rocket.current.x)
                .map(|i| state.batteries[i].x)?;
            let launch = Vec2::new(battery_x, MISSILE_LAUNCH_Y);

            // Lead by the interceptor's flight time
            let flight_ticks = distance(launch, rocket.current) / MISSILE_SPEED;
            let lead = unit_direction(rocket.start, rocket.target) * rocket.speed * flight_ticks;
            let mut aim = rocket.current + lead;
            aim.y = aim.y.min(FIRE_DEAD_ZONE_Y);

            let covered = state
                .missiles
                .iter()
                .any(|m| !m.is_finished && distance(m.target, aim) < EXPLOSION_MAX_RADIUS);
            if !covered {
                return Some(aim);
            }
        }
        None
    }

    /// Fire if the cooldown allows and there is something to hit
    pub fn act(&mut self, state: &mut GameState, now_ms: f64) -> u32 {
        if !state.is_playing() || now_ms - self.last_fire_ms < self.cooldown_ms {
            return 0;
        }
        let Some(aim) = Self::choose_target(state) else {
            return 0;
        };
        let fired = fire(state, aim);
        if fired > 0 {
            self.last_fire_ms = now_ms;
        }
        fired
    }
}

/// Game instance holding the state and loop timing
pub struct Game {
    state: GameState,
    viewport: Viewport,
    autopilot: Option<Autopilot>,
    draw_interval_ms: f64,
    last_draw_ms: Option<f64>,
    frames: u64,
}

impl Game {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            state: GameState::new(seed),
            viewport: Viewport::default(),
            autopilot: settings
                .autopilot
                .then(|| Autopilot::new(settings.autopilot_cooldown_ms)),
            draw_interval_ms: settings.draw_interval_ms(),
            last_draw_ms: None,
            frames: 0,
        }
    }

    /// Read-only snapshot for renderers and callers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Frames processed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Start or restart the game
    pub fn start(&mut self, now_ms: f64) {
        self.state.restart(now_ms);
        log::info!("Game started with seed: {}", self.state.seed);
    }

    /// Pointer-down in device pixels; ignored unless playing
    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) -> u32 {
        pointer_down(&mut self.state, &self.viewport, client_x, client_y)
    }

    /// Run one animation frame: update always, draw when the draw interval has elapsed
    pub fn frame<R: Renderer>(&mut self, now_ms: f64, renderer: &mut R) -> std::io::Result<()> {
        self.update(now_ms);

        let due = self
            .last_draw_ms
            .is_none_or(|last| now_ms - last >= self.draw_interval_ms);
        if due {
            renderer.draw(&self.state)?;
            self.last_draw_ms = Some(now_ms);
        }
        Ok(())
    }

    fn update(&mut self, now_ms: f64) {
        self.frames += 1;
        if let Some(autopilot) = self.autopilot.as_mut() {
            autopilot.act(&mut self.state, now_ms);
        }
        tick(&mut self.state, now_ms);

        for event in self.state.drain_events() {
            match event {
                GameEvent::StatusChanged { from, to } => {
                    log::info!("Status {:?} -> {:?} (score {})", from, to, self.state.score)
                }
                GameEvent::CityDestroyed { city_id } => log::warn!("City {} lost", city_id),
                GameEvent::BatteryDestroyed { battery_id } => {
                    log::warn!("Battery {} lost", battery_id)
                }
                other => log::debug!("{:?}", other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameStatus, Rocket};

    /// Counts draws
    #[derive(Default)]
    struct CountingRenderer {
        draws: u32,
        last_score: u32,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, state: &GameState) -> std::io::Result<()> {
            self.draws += 1;
            self.last_score = state.score;
            Ok(())
        }
    }

    fn manual_settings() -> Settings {
        Settings {
            autopilot: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_draw_rate_is_independent_of_update_rate() {
        let mut game = Game::new(1, &manual_settings());
        game.start(0.0);
        let mut r = CountingRenderer::default();

        // 1000 Hz updates for one second
        for i in 0..1000 {
            game.frame(i as f64, &mut r).unwrap();
        }
        assert_eq!(game.frames(), 1000);
        // A draw every 17ms at 1ms resolution
        assert!((55..=61).contains(&r.draws), "draws = {}", r.draws);
    }

    #[test]
    fn test_start_state_is_idle() {
        let mut game = Game::new(1, &manual_settings());
        let mut r = CountingRenderer::default();
        for i in 0..100 {
            game.frame(i as f64 * 50.0, &mut r).unwrap();
        }
        assert_eq!(game.state().status, GameStatus::Start);
        assert!(game.state().rockets.is_empty());
        assert_eq!(game.pointer_down(400.0, 300.0), 0);
    }

    #[test]
    fn test_pointer_goes_through_viewport() {
        let mut game = Game::new(1, &manual_settings());
        game.start(0.0);
        // Surface drawn at double size
        game.set_viewport(Viewport::new(0.0, 0.0, 1600.0, 1200.0));
        assert_eq!(game.pointer_down(80.0, 200.0), 3);
        // Closest battery to x=40 is the left one
        assert_eq!(game.state().batteries[0].missiles, INITIAL_MISSILES_SIDE - 3);
        assert_eq!(game.state().missiles[1].target, Vec2::new(40.0, 100.0));
    }

    #[test]
    fn test_rockets_arrive_after_start() {
        let mut game = Game::new(1, &manual_settings());
        game.start(0.0);
        let mut r = CountingRenderer::default();
        let mut now = 0.0;
        while now < 2500.0 {
            now += 16.0;
            game.frame(now, &mut r).unwrap();
        }
        // Opener at 100ms plus one cadence spawn after 2s
        assert_eq!(game.state().rockets.len(), 2);
    }

    #[test]
    fn test_autopilot_leads_lowest_rocket() {
        let mut state = GameState::new(2);
        state.restart(0.0);
        let high = state.next_entity_id();
        state
            .rockets
            .push(Rocket::new(high, Vec2::new(100.0, 0.0), Vec2::new(150.0, ROCKET_TARGET_Y), 1.0));
        let low = state.next_entity_id();
        let mut rocket = Rocket::new(low, Vec2::new(600.0, 0.0), Vec2::new(650.0, ROCKET_TARGET_Y), 1.0);
        rocket.current = Vec2::new(620.0, 300.0);
        state.rockets.push(rocket);

        let aim = Autopilot::choose_target(&state).unwrap();
        assert!(aim.y > 300.0 && aim.x > 620.0, "aim {:?}", aim);

        let mut pilot = Autopilot::new(400.0);
        assert_eq!(pilot.act(&mut state, 0.0), 3);
        // Cooling down
        assert_eq!(pilot.act(&mut state, 100.0), 0);
        // Lowest rocket is now covered, so the next volley goes after the other one
        let next = Autopilot::choose_target(&state).unwrap();
        assert!(next.x < 300.0, "next {:?}", next);
    }

    #[test]
    fn test_autopilot_plays_until_game_ends() {
        let settings = Settings::default();
        let mut game = Game::new(77, &settings);
        game.start(0.0);
        let mut r = CountingRenderer::default();
        let mut now = 0.0;
        for _ in 0..settings.max_frames {
            now += settings.frame_ms;
            game.frame(now, &mut r).unwrap();
            if !game.state().is_playing() {
                break;
            }
        }
        assert!(game.state().score > 0);
        assert_eq!(r.last_score % SCORE_PER_ROCKET, 0);
    }
}
