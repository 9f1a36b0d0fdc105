use log::info;
use std::collections::VecDeque;

use crate::grid::{Cell, GridSimulation, GridSize, StepResult};
use crate::input::{InputEvent, Key, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Answers whether a screen position lies over the menu's start button.
pub trait HitTest {
    fn is_over_start_control(&self, point: Point) -> bool;
}

/// Read-only view of everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub snake: &'a VecDeque<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub best_score: u32,
    pub size: GridSize,
    /// Last known pointer position, for hover feedback.
    pub pointer: Option<Point>,
}

pub struct GameController {
    state: GameState,
    sim: GridSimulation,
    pointer: Option<Point>,
    quit_requested: bool,
}

impl GameController {
    pub fn new(sim: GridSimulation) -> Self {
        GameController {
            state: GameState::Menu,
            sim,
            pointer: None,
            quit_requested: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn simulation(&self) -> &GridSimulation {
        &self.sim
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn handle_event(&mut self, event: InputEvent, hit_test: &impl HitTest) {
        match event {
            InputEvent::QuitRequested => {
                info!("Quit requested in {:?}", self.state);
                self.quit_requested = true;
            }
            InputEvent::KeyPressed(key) => self.handle_key(key.resolve_alias()),
            InputEvent::PointerMoved(point) => self.pointer = Some(point),
            InputEvent::PointerPressed(point) => {
                self.pointer = Some(point);
                if self.state == GameState::Menu && hit_test.is_over_start_control(point) {
                    self.transition(GameState::Playing);
                }
            }
        }
    }

    fn handle_key(&mut self, key: Key) {
        match self.state {
            GameState::Menu => match key {
                Key::Space | Key::Enter => self.transition(GameState::Playing),
                _ => {}
            },
            GameState::Playing => match key {
                Key::Space => self.transition(GameState::Paused),
                _ => {
                    if let Some(direction) = key.direction() {
                        self.sim.set_pending_direction(direction);
                    }
                }
            },
            GameState::Paused => match key {
                Key::Space => self.transition(GameState::Playing),
                Key::Escape => {
                    self.sim.reset();
                    self.transition(GameState::Menu);
                }
                _ => {}
            },
            GameState::GameOver => match key {
                Key::Enter => {
                    self.sim.reset();
                    self.transition(GameState::Playing);
                }
                Key::Escape => {
                    self.sim.reset();
                    self.transition(GameState::Menu);
                }
                _ => {}
            },
        }
    }

    /// Advances the simulation by one step when playing.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.state != GameState::Playing {
            return None;
        }

        let result = self.sim.step();
        if result == StepResult::Collided {
            info!(
                "Game over with score {} at length {} (best {})",
                self.sim.score(),
                self.sim.len(),
                self.sim.best_score()
            );
            self.transition(GameState::GameOver);
        }
        Some(result)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            snake: self.sim.snake(),
            food: self.sim.food(),
            score: self.sim.score(),
            best_score: self.sim.best_score(),
            size: self.sim.size(),
            pointer: self.pointer,
        }
    }

    fn transition(&mut self, to: GameState) {
        info!("{:?} -> {:?}", self.state, to);
        self.state = to;
    }
}
