//! Core game state and physics. No terminal, audio, or timing bindings live
//! here; the frame loop in `main` drives [`Game::update`] and reacts to the
//! returned [`TickEvents`].

use rand::Rng;

/// Logical playfield size. Physics constants below are tuned for this
/// coordinate space; the renderer scales it to the actual terminal.
pub const CANVAS_W: f64 = 800.0;
pub const CANVAS_H: f64 = 600.0;

pub const BIRD_X: f64 = 80.0;
pub const BIRD_SIZE: f64 = 30.0;
pub const GRAVITY: f64 = 0.1;
pub const JUMP_IMPULSE: f64 = -3.0;

pub const PIPE_W: f64 = 50.0;
pub const PIPE_SPEED: f64 = 2.5;
pub const PIPE_GAP: f64 = 150.0;
/// A new pipe spawns once the newest one has moved this far in from the
/// right edge.
pub const PIPE_SPACING: f64 = 250.0;
/// Minimum distance between the gap and the top/bottom of the playfield.
pub const GAP_MARGIN: f64 = 60.0;

/// Every this many points, the fireworks go off.
pub const CELEBRATION_STEP: u32 = 10;

pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub v: f64,
}

impl Bird {
    fn spawn(canvas_h: f64) -> Self {
        Bird {
            x: BIRD_X,
            y: canvas_h / 2.0,
            w: BIRD_SIZE,
            h: BIRD_SIZE,
            v: 0.0,
        }
    }
}

pub struct Pipe {
    pub x: f64,
    pub w: f64,
    /// The gap's top edge; the top stub spans `0..top_h`.
    pub top_h: f64,
    /// The gap's bottom edge; the bottom stub spans `bottom_y..canvas_h`.
    pub bottom_y: f64,
    pub scored: bool,
}

impl Pipe {
    fn spawn(canvas_w: f64, canvas_h: f64, rng: &mut impl Rng) -> Self {
        // Clamp so a degenerate playfield never produces an empty range.
        let range = (canvas_h - PIPE_GAP - 2.0 * GAP_MARGIN).max(0.0);
        let top_h = if range > 0.0 {
            GAP_MARGIN + rng.gen_range(0.0..range)
        } else {
            GAP_MARGIN
        };
        Pipe {
            x: canvas_w,
            w: PIPE_W,
            top_h,
            bottom_y: top_h + PIPE_GAP,
            scored: false,
        }
    }
}

/// AABB-vs-gap test. Edges are exclusive: a bird exactly flush with the gap
/// is still inside it.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    bird.x < pipe.x + pipe.w
        && bird.x + bird.w > pipe.x
        && (bird.y < pipe.top_h || bird.y + bird.h > pipe.bottom_y)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    NotStarted,
    Running,
    GameOver,
}

/// What happened during one tick, for the driver to turn into sound and
/// fireworks. The core never touches those collaborators itself.
#[derive(Clone, Copy, Default, Debug)]
pub struct TickEvents {
    pub scored: bool,
    pub celebration: bool,
    pub game_over: bool,
}

/// One game session: the bird, the pipe sequence, and the score, all owned
/// here rather than floating in ambient scope.
pub struct Game {
    pub canvas_w: f64,
    pub canvas_h: f64,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub state: State,
    /// Last score at which the fireworks fired, so a threshold never
    /// triggers twice.
    pub last_celebration_score: u32,
}

impl Game {
    pub fn new(canvas_w: f64, canvas_h: f64) -> Self {
        Game {
            canvas_w,
            canvas_h,
            bird: Bird::spawn(canvas_h),
            pipes: Vec::new(),
            score: 0,
            state: State::NotStarted,
            last_celebration_score: 0,
        }
    }

    /// Fresh session: bird back at spawn, pipes cleared, score zeroed.
    pub fn reset(&mut self) {
        self.bird = Bird::spawn(self.canvas_h);
        self.pipes.clear();
        self.score = 0;
        self.last_celebration_score = 0;
        self.state = State::Running;
    }

    /// The shared click/spacebar action: jump while running, otherwise
    /// start (or restart) a session.
    pub fn primary_input(&mut self) {
        match self.state {
            State::Running => self.bird.v = JUMP_IMPULSE,
            State::NotStarted | State::GameOver => self.reset(),
        }
    }

    /// The dedicated restart control. Goes through the not-started marker
    /// so it always yields a fresh session, whatever state we were in.
    pub fn restart(&mut self) {
        self.state = State::NotStarted;
        self.reset();
    }

    /// Advance the simulation by one frame. A no-op outside `Running`.
    pub fn update(&mut self, rng: &mut impl Rng) -> TickEvents {
        let mut events = TickEvents::default();
        if self.state != State::Running {
            return events;
        }

        self.bird.v += GRAVITY;
        self.bird.y += self.bird.v;

        let needs_pipe = match self.pipes.last() {
            None => true,
            Some(p) => p.x < self.canvas_w - PIPE_SPACING,
        };
        if needs_pipe {
            self.pipes
                .push(Pipe::spawn(self.canvas_w, self.canvas_h, rng));
        }

        let mut dead = false;
        for p in &mut self.pipes {
            p.x -= PIPE_SPEED;
            if hits_pipe(&self.bird, p) {
                dead = true;
            }
            if !p.scored && p.x + p.w < self.bird.x {
                p.scored = true;
                self.score += 1;
                events.scored = true;
                if self.score % CELEBRATION_STEP == 0
                    && self.score > self.last_celebration_score
                {
                    self.last_celebration_score = self.score;
                    events.celebration = true;
                }
            }
        }
        self.pipes.retain(|p| p.x + p.w >= 0.0);

        // Strict ceiling: touching the top ends the game even though the
        // bird could visually fall back down.
        if self.bird.y + self.bird.h > self.canvas_h || self.bird.y < 0.0 {
            dead = true;
        }
        if dead {
            self.state = State::GameOver;
            events.game_over = true;
        }
        events
    }
}
