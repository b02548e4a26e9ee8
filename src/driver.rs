//! Frame driver
//!
//! Owns the session and runs the single-threaded event loop: wait for the
//! next timer, queue what is due, handle events in arrival order. Each
//! REFRESH maps the held keys to a `TickInput`, advances the simulation one
//! tick and draws the frame. Effects emitted by the simulation are executed
//! right after the event that produced them.

use crate::audio::{AudioManager, Sounds};
use crate::consts::REFRESH_MS;
use crate::error::AssetError;
use crate::platform::{AssetProvider, AudioSink, Clock, InputSource, Key, Renderer};
use crate::renderer::{Sprites, draw_frame};
use crate::settings::Settings;
use crate::sim::{Effect, GameState, TickInput, phase, tick};
use crate::timer::{Event, EventQueue, Timers};

/// Map held keys to tick controls
pub fn map_controls(input: &impl InputSource, now_ms: u64) -> TickInput {
    let held = |a: Key, b: Key| input.is_pressed(a) || input.is_pressed(b);
    TickInput {
        turn_left: held(Key::Left, Key::A),
        turn_right: held(Key::Right, Key::D),
        thrust: held(Key::Up, Key::W),
        fire: input.is_pressed(Key::Space),
        now_ms,
        idle_mode: false,
    }
}

/// Game instance holding all state
pub struct Game<R: Renderer, S: AudioSink> {
    state: GameState,
    sprites: Sprites,
    audio: AudioManager<S>,
    renderer: R,
    timers: Timers,
    queue: EventQueue,
    idle_mode: bool,
    running: bool,
}

impl<R: Renderer, S: AudioSink> Game<R, S> {
    /// Open the display and load every asset up front; any failure aborts startup
    pub fn new(
        settings: &Settings,
        assets: &mut impl AssetProvider,
        mut renderer: R,
        sink: S,
    ) -> Result<Self, AssetError> {
        renderer.open()?;
        let sprites = Sprites::load(assets)?;
        let sounds = Sounds::load(assets)?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = GameState::new(seed);
        state.cue_lengths = sounds.cue_lengths();
        state.ship.size = sprites.ship_size();
        log::info!("Game initialized with seed: {}", seed);

        Ok(Self {
            state,
            sprites,
            audio: AudioManager::new(sink, sounds, settings),
            renderer,
            timers: Timers::new(),
            queue: EventQueue::new(),
            idle_mode: settings.idle_mode,
            running: true,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle one event at clock time `now_ms`
    pub fn handle_event(&mut self, event: Event, input: &impl InputSource, now_ms: u64) {
        match event {
            Event::Refresh => {
                let mut controls = map_controls(input, now_ms);
                controls.idle_mode = self.idle_mode;
                tick(&mut self.state, &controls);
                draw_frame(&mut self.renderer, &self.state, &self.sprites);
            }
            Event::Timer(kind) => {
                // Single-shot: make sure it cannot fire again
                self.timers.disarm(event);
                phase::on_timer(&mut self.state, kind);
            }
            Event::Click => {
                phase::click(&mut self.state);
            }
            Event::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
        }
        self.apply_effects(now_ms);
    }

    fn apply_effects(&mut self, now_ms: u64) {
        for effect in self.state.drain_effects() {
            match effect {
                Effect::StartMusic => self.audio.start_music(),
                Effect::StopMusic => self.audio.stop_music(),
                Effect::Play(cue) => self.audio.play(cue),
                Effect::ArmTimer { kind, after_ms } => {
                    log::debug!("arming {:?} in {} ms", kind, after_ms);
                    self.timers.arm_once(Event::Timer(kind), now_ms, after_ms);
                }
            }
        }
    }

    /// Run the event loop until quit, or until the next event would be after `until_ms`
    pub fn run(
        &mut self,
        clock: &mut impl Clock,
        input: &mut impl InputSource,
        until_ms: Option<u64>,
    ) {
        if !self.timers.is_armed(Event::Refresh) {
            self.timers.arm_periodic(Event::Refresh, clock.now_ms(), REFRESH_MS);
        }

        while self.running {
            if input.quit_requested() {
                self.queue.push(Event::Quit);
            }
            while input.take_click() {
                self.queue.push(Event::Click);
            }

            if self.queue.is_empty() {
                let Some(due) = self.timers.next_due() else {
                    break;
                };
                if until_ms.is_some_and(|limit| due > limit) {
                    break;
                }
                clock.wait_until(due);
                self.timers.fire_due(clock.now_ms(), &mut self.queue);
            }

            while let Some(event) = self.queue.pop() {
                self.handle_event(event, &*input, clock.now_ms());
                if !self.running {
                    break;
                }
            }
        }
    }
}
