use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};

/// Points awarded for every piece of food eaten.
pub const FOOD_SCORE: u32 = 10;

/// Number of segments the snake starts with after a reset.
pub const INITIAL_LENGTH: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize {
            width: 30,
            height: 22,
        }
    }
}

impl GridSize {
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width as i32).contains(&cell.x) && (0..self.height as i32).contains(&cell.y)
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell { x, y }))
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector `(dx, dy)`; y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Continued, // Moved one cell, length unchanged
    Ate,       // Moved onto the food and grew by one
    Collided,  // Hit a wall or itself, nothing moved
}

/// The snake, its food and the score on a bounded grid.
///
/// The board is assumed to always have room for food while the game can still
/// be won or lost normally. When the snake covers every cell there is simply no
/// food; the following step is then guaranteed to collide.
#[derive(Debug)]
pub struct GridSimulation {
    size: GridSize,
    snake: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
    food: Option<Cell>,
    score: u32,
    best_score: u32,
    rng: StdRng,
}

impl GridSimulation {
    pub fn new(size: GridSize) -> Self {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Same as [`GridSimulation::new`] but with reproducible food placement.
    pub fn with_seed(size: GridSize, seed: u64) -> Self {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: GridSize, rng: StdRng) -> Self {
        let mut sim = GridSimulation {
            size,
            snake: VecDeque::with_capacity(size.area()),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            score: 0,
            best_score: 0,
            rng,
        };
        sim.reset();
        sim
    }

    /// Puts a fresh three segment snake in the middle of the board, heading
    /// right, and clears the score. The best score survives.
    pub fn reset(&mut self) {
        let center = Cell::new(self.size.width as i32 / 2, self.size.height as i32 / 2);

        self.snake.clear();
        for i in 0..INITIAL_LENGTH as i32 {
            self.snake.push_back(Cell::new(center.x - i, center.y));
        }
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;

        debug!("Reset snake to {:?}", self.snake);
        self.spawn_food();
    }

    /// Places the food on a uniformly chosen cell not covered by the snake.
    pub fn spawn_food(&mut self) {
        let occupied: HashSet<Cell> = self.snake.iter().copied().collect();
        self.food = self
            .size
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng);

        match self.food {
            Some(food) => debug!("Spawned food at {:?}", food),
            None => warn!("No free cell left for food"),
        }
    }

    /// Buffers a heading change for the next step. Reversing straight back
    /// into the neck is ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    pub fn step(&mut self) -> StepResult {
        self.direction = self.pending_direction;
        let new_head = self.head().offset(self.direction);

        if !self.size.contains(new_head) || self.snake.contains(&new_head) {
            debug!("Collided at {:?} with score {}", new_head, self.score);
            self.best_score = self.best_score.max(self.score);
            return StepResult::Collided;
        }

        self.snake.push_front(new_head);

        if self.food == Some(new_head) {
            self.score += FOOD_SCORE;
            self.best_score = self.best_score.max(self.score);
            self.spawn_food();
            StepResult::Ate
        } else {
            self.snake.pop_back();
            StepResult::Continued
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Head first.
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        // reset() always leaves at least one segment and step() never shrinks
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[cfg(test)]
    pub(crate) fn from_layout(
        size: GridSize,
        snake: &[Cell],
        direction: Direction,
        food: Cell,
    ) -> Self {
        let mut sim = Self::with_seed(size, 7);
        sim.snake = snake.iter().copied().collect();
        sim.direction = direction;
        sim.pending_direction = direction;
        sim.food = Some(food);
        sim
    }
}
