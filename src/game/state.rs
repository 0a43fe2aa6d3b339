use super::clock::{Clock, MonotonicClock};
use super::direction::{Cell, Direction};
use super::food::Food;
use super::snake::Snake;
use super::variant::Variant;
use crate::consts;
use crate::highscore::HighScoreFile;
use crate::util::error_chain;
use rand::Rng;
use std::time::{Duration, Instant};

/// The events the game reacts to, independent of which keys produced them
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputEvent {
    Quit,
    DirectionPressed(Direction),
    RestartPressed,
}

/// The complete state of a game: the current round plus the high score,
/// which outlives rounds
#[derive(Clone, Debug)]
pub(crate) struct GameState<R = rand::rngs::ThreadRng, C = MonotonicClock> {
    rng: R,
    clock: C,
    variant: Variant,
    store: HighScoreFile,
    high_score: u32,
    round: Round,
}

/// Everything that starts over on a restart
#[derive(Clone, Debug, Eq, PartialEq)]
struct Round {
    snake: Snake,
    food: Food,
    score: u32,
    started: Instant,
    /// Time from `started` to the most recent tick
    elapsed: Duration,
    /// Ticks per second
    speed: u32,
    game_over: bool,
}

impl Round {
    fn new<R: Rng + ?Sized>(variant: Variant, rng: &mut R, now: Instant) -> Round {
        let start = Cell::new(consts::GRID_WIDTH / 2, consts::GRID_HEIGHT / 2);
        Round {
            snake: Snake::new(start, Direction::Right),
            food: Food::spawn(rng, variant),
            score: 0,
            started: now,
            elapsed: Duration::ZERO,
            speed: variant.speed_for(0),
            game_over: false,
        }
    }
}

impl<R: Rng, C: Clock> GameState<R, C> {
    /// Start a new game.  The high score is read from `store`; if that
    /// fails, the failure is logged and the high score starts at 0.
    pub(crate) fn new(variant: Variant, store: HighScoreFile, mut rng: R, clock: C) -> Self {
        let high_score = store.load().unwrap_or_else(|e| {
            log::warn!("{}; starting with a high score of 0", error_chain(&e));
            0
        });
        let round = Round::new(variant, &mut rng, clock.now());
        GameState {
            rng,
            clock,
            variant,
            store,
            high_score,
            round,
        }
    }

    /// Apply one input event.  Turns are ignored once the game is over,
    /// and a restart is ignored until it is.  `Quit` is left to the caller.
    pub(crate) fn apply_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::DirectionPressed(direction) => {
                if !self.round.game_over {
                    self.round.snake.set_direction(direction);
                }
            }
            InputEvent::RestartPressed => {
                if self.round.game_over {
                    self.reset();
                }
            }
            InputEvent::Quit => (),
        }
    }

    /// Advance the game by one step.  Does nothing once the game is over.
    pub(crate) fn tick(&mut self) {
        if self.round.game_over {
            return;
        }
        let now = self.clock.now();
        if self.variant.tracks_time() {
            self.round.elapsed = now.saturating_duration_since(self.round.started);
        }
        self.round.snake.advance(self.variant);
        if self.round.snake.head() == self.round.food.cell() {
            self.eat(now);
        }
        if self.round.food.expired(now) {
            self.round.food = Food::spawn(&mut self.rng, self.variant);
        }
        let head = self.round.snake.head();
        if self.round.snake.collides_with_self() || self.variant.hits_wall(head) {
            self.round.game_over = true;
            log::info!(
                "Game over: {} game ended with a score of {} and a snake of length {}",
                self.variant,
                self.round.score,
                self.round.snake.len()
            );
        }
    }

    fn eat(&mut self, now: Instant) {
        let eaten = self.round.food;
        log::debug!(
            "Ate {}{} worth {}",
            if eaten.is_special() { "special " } else { "" },
            eaten.kind().name(),
            eaten.points()
        );
        self.round.snake.grow_next();
        self.round.score = self.round.score.saturating_add(eaten.points());
        if self.round.score > self.high_score {
            self.high_score = self.round.score;
            match self.store.save(self.high_score) {
                Ok(()) if self.store.path().is_some() => {
                    log::info!("New high score of {} saved", self.high_score);
                }
                Ok(()) => (),
                Err(e) => log::error!("{}", error_chain(&e)),
            }
        }
        self.round.food = Food::spawn(&mut self.rng, self.variant);
        if self
            .variant
            .special_food_chance()
            .is_some_and(|p| self.rng.random_bool(p))
        {
            self.round.food.promote_to_special(now);
        }
        self.round.speed = self.variant.speed_for(self.round.score);
    }

    /// Start a new round.  Only the high score carries over.
    pub(crate) fn reset(&mut self) {
        self.round = Round::new(self.variant, &mut self.rng, self.clock.now());
        log::info!("Restarting {} game", self.variant);
    }
}

impl<R, C> GameState<R, C> {
    pub(crate) fn variant(&self) -> Variant {
        self.variant
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.round.snake
    }

    pub(crate) fn food(&self) -> &Food {
        &self.round.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.round.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whole seconds since the start of the round, as of the latest tick
    pub(crate) fn elapsed_secs(&self) -> u64 {
        self.round.elapsed.as_secs()
    }

    pub(crate) fn speed(&self) -> u32 {
        self.round.speed
    }

    /// Time between ticks at the current speed
    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.speed().max(1)
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.round.game_over
    }

    #[cfg(test)]
    pub(super) fn set_game_over(&mut self) {
        self.round.game_over = true;
    }

    #[cfg(test)]
    pub(super) fn set_food(&mut self, food: Food) {
        self.round.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clock::ManualClock;
    use crate::game::food::FruitKind;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use tempfile::tempdir;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A cell the snake never reaches in these tests
    const OUT_OF_THE_WAY: Cell = Cell::new(0, 29);

    fn new_state(variant: Variant) -> GameState<ChaCha12Rng, ManualClock> {
        new_state_with_store(variant, HighScoreFile::disabled())
    }

    fn new_state_with_store(
        variant: Variant,
        store: HighScoreFile,
    ) -> GameState<ChaCha12Rng, ManualClock> {
        let mut state = GameState::new(
            variant,
            store,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            ManualClock::new(),
        );
        state.round.food = far_food();
        state
    }

    fn far_food() -> Food {
        Food::new(OUT_OF_THE_WAY, FruitKind::Apple)
    }

    /// Put `kind` directly in front of the snake's head
    fn feed(state: &mut GameState<ChaCha12Rng, ManualClock>, kind: FruitKind) {
        let snake = state.snake();
        let cell = state.variant.wrap(snake.heading().step(snake.head()));
        state.round.food = Food::new(cell, kind);
    }

    #[rstest]
    #[case(Variant::Basic, 10)]
    #[case(Variant::Enhanced, 6)]
    fn initial_state(#[case] variant: Variant, #[case] speed: u32) {
        let state = new_state(variant);
        assert_eq!(state.snake().head(), Cell::new(20, 15));
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.snake().heading(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert_eq!(state.speed(), speed);
        assert_eq!(state.elapsed_secs(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn initial_food_is_in_play_field() {
        for seed in 0..50 {
            let state = GameState::new(
                Variant::Enhanced,
                HighScoreFile::disabled(),
                ChaCha12Rng::seed_from_u64(seed),
                ManualClock::new(),
            );
            assert!(Variant::Enhanced.contains(state.food().cell()));
            assert!(!state.food().is_special());
        }
    }

    #[rstest]
    #[case(Variant::Basic)]
    #[case(Variant::Enhanced)]
    fn first_tick_moves_right(#[case] variant: Variant) {
        let mut state = new_state(variant);
        state.tick();
        assert_eq!(state.snake().head(), Cell::new(21, 15));
        assert_eq!(state.snake().len(), 1);
        assert!(!state.is_game_over());
    }

    #[test]
    fn length_is_constant_without_food() {
        let mut state = new_state(Variant::Enhanced);
        state.round.snake =
            Snake::from_cells(&[(10, 10), (9, 10), (8, 10), (7, 10)], Direction::Right);
        for _ in 0..25 {
            state.tick();
            assert_eq!(state.snake().len(), 4);
        }
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn eating_grows_on_the_following_tick() {
        let mut state = new_state(Variant::Enhanced);
        feed(&mut state, FruitKind::Banana);
        state.tick();
        assert_eq!(state.score(), 2);
        assert_eq!(state.snake().len(), 1);
        state.round.food = far_food();
        state.tick();
        assert_eq!(state.snake().len(), 2);
        state.tick();
        assert_eq!(state.snake().len(), 2);
    }

    #[test]
    fn reversal_input_is_ignored() {
        let mut state = new_state(Variant::Basic);
        state.apply_input(InputEvent::DirectionPressed(Direction::Left));
        assert_eq!(state.snake().heading(), Direction::Right);
        state.tick();
        assert_eq!(state.snake().head(), Cell::new(21, 15));
    }

    #[test]
    fn last_accepted_turn_wins() {
        let mut state = new_state(Variant::Basic);
        state.apply_input(InputEvent::DirectionPressed(Direction::Up));
        state.apply_input(InputEvent::DirectionPressed(Direction::Left));
        state.tick();
        assert_eq!(state.snake().head(), Cell::new(19, 15));
    }

    #[test]
    fn turns_are_ignored_after_game_over() {
        let mut state = new_state(Variant::Basic);
        state.set_game_over();
        state.apply_input(InputEvent::DirectionPressed(Direction::Up));
        assert_eq!(state.snake().heading(), Direction::Right);
    }

    #[rstest]
    #[case(Cell::new(39, 5), Direction::Right)]
    #[case(Cell::new(0, 5), Direction::Left)]
    #[case(Cell::new(5, 0), Direction::Up)]
    #[case(Cell::new(5, 29), Direction::Down)]
    fn basic_wall_is_fatal(#[case] start: Cell, #[case] heading: Direction) {
        let mut state = new_state(Variant::Basic);
        state.round.food = Food::new(Cell::new(20, 20), FruitKind::Food);
        state.round.snake = Snake::new(start, heading);
        state.tick();
        assert!(state.is_game_over());
        assert_eq!(state.score(), 0);
    }

    #[rstest]
    #[case(Cell::new(39, 5), Direction::Right, Cell::new(0, 5))]
    #[case(Cell::new(0, 5), Direction::Left, Cell::new(39, 5))]
    #[case(Cell::new(5, 2), Direction::Up, Cell::new(5, 29))]
    #[case(Cell::new(5, 29), Direction::Down, Cell::new(5, 2))]
    fn enhanced_wraps_instead(#[case] start: Cell, #[case] heading: Direction, #[case] end: Cell) {
        let mut state = new_state(Variant::Enhanced);
        state.round.food = Food::new(Cell::new(20, 20), FruitKind::Apple);
        state.round.snake = Snake::new(start, heading);
        state.tick();
        assert!(!state.is_game_over());
        assert_eq!(state.snake().head(), end);
    }

    #[rstest]
    #[case(Variant::Basic)]
    #[case(Variant::Enhanced)]
    fn self_collision_is_fatal(#[case] variant: Variant) {
        let mut state = new_state(variant);
        state.round.snake =
            Snake::from_cells(&[(12, 12), (13, 12), (13, 11), (12, 11), (11, 11)], Direction::Up);
        state.tick();
        assert!(state.is_game_over());
    }

    #[test]
    fn tick_is_inert_after_game_over() {
        let mut state = new_state(Variant::Enhanced);
        state.set_game_over();
        let before = state.round.clone();
        state.clock.advance(Duration::from_secs(30));
        state.tick();
        assert_eq!(state.round, before);
    }

    #[test]
    fn restart_only_after_game_over() {
        let mut state = new_state(Variant::Enhanced);
        state.tick();
        state.apply_input(InputEvent::RestartPressed);
        assert_eq!(state.snake().head(), Cell::new(21, 15));
        state.set_game_over();
        state.apply_input(InputEvent::RestartPressed);
        assert!(!state.is_game_over());
        assert_eq!(state.snake().head(), Cell::new(20, 15));
    }

    #[test]
    fn scoring_and_high_score() {
        let tmpdir = tempdir().unwrap();
        let store = HighScoreFile::new(tmpdir.path().join("high_score.json"));
        store.save(5).unwrap();
        let mut state = new_state_with_store(Variant::Enhanced, store.clone());
        assert_eq!(state.high_score(), 5);

        feed(&mut state, FruitKind::Grape);
        state.tick();
        assert_eq!(state.score(), 5);
        assert_eq!(state.high_score(), 5);

        state.round.food = far_food();
        state.tick();
        feed(&mut state, FruitKind::Apple);
        state.tick();
        assert_eq!(state.score(), 6);
        assert_eq!(state.high_score(), 6);
        assert_eq!(store.load().unwrap(), 6);

        state.set_game_over();
        state.apply_input(InputEvent::RestartPressed);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 6);
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.speed(), 6);
    }

    #[test]
    fn speed_ramps_with_score() {
        let mut state = new_state(Variant::Enhanced);
        state.round.score = 9;
        feed(&mut state, FruitKind::Apple);
        state.tick();
        assert_eq!(state.score(), 10);
        assert_eq!(state.speed(), 7);
        assert_eq!(state.tick_period(), Duration::from_secs(1) / 7);
    }

    #[test]
    fn speed_is_capped() {
        let mut state = new_state(Variant::Enhanced);
        state.round.score = 95;
        feed(&mut state, FruitKind::Grape);
        state.tick();
        assert_eq!(state.speed(), 12);
    }

    #[test]
    fn basic_speed_is_fixed() {
        let mut state = new_state(Variant::Basic);
        state.round.score = 40;
        feed(&mut state, FruitKind::Food);
        state.tick();
        assert_eq!(state.score(), 41);
        assert_eq!(state.speed(), 10);
    }

    #[test]
    fn special_food_is_worth_double() {
        let mut state = new_state(Variant::Enhanced);
        feed(&mut state, FruitKind::Orange);
        let now = state.clock.now();
        state.round.food.promote_to_special(now);
        state.tick();
        assert_eq!(state.score(), 6);
    }

    #[test]
    fn special_food_expires() {
        let mut state = new_state(Variant::Enhanced);
        let now = state.clock.now();
        state.round.food.promote_to_special(now);

        state.clock.advance(consts::SPECIAL_FOOD_LIFETIME);
        state.tick();
        assert!(state.food().is_special());
        assert_eq!(state.food().cell(), OUT_OF_THE_WAY);

        state.clock.advance(Duration::from_millis(1));
        state.tick();
        assert!(!state.food().is_special());
        assert_eq!(state.score(), 0);
        assert!(Variant::Enhanced.contains(state.food().cell()));
    }

    #[test]
    fn special_food_from_eat_expires_after_lifetime() {
        let mut state = new_state(Variant::Enhanced);
        for _ in 0..500 {
            state.round.snake = Snake::new(Cell::new(5, 10), Direction::Right);
            state.round.food = Food::new(Cell::new(6, 10), FruitKind::Apple);
            state.tick();
            if state.food().is_special() {
                break;
            }
        }
        assert!(state.food().is_special());
        let cell = state.food().cell();
        let row = if cell.y == 10 { 20 } else { 10 };
        state.round.snake = Snake::new(Cell::new(0, row), Direction::Right);

        state.clock.advance(consts::SPECIAL_FOOD_LIFETIME);
        state.tick();
        assert!(state.food().is_special());
        assert_eq!(state.food().cell(), cell);

        state.clock.advance(Duration::from_millis(1));
        state.tick();
        assert!(!state.food().is_special());
    }

    #[rstest]
    #[case(Variant::Basic, false)]
    #[case(Variant::Enhanced, true)]
    fn special_food_appears_only_in_enhanced(#[case] variant: Variant, #[case] expected: bool) {
        let mut state = new_state(variant);
        let mut saw_special = false;
        for _ in 0..200 {
            state.round.snake = Snake::new(Cell::new(5, 10), Direction::Right);
            state.round.food = Food::new(Cell::new(6, 10), variant.fruits()[0]);
            state.tick();
            saw_special |= state.food().is_special();
        }
        assert_eq!(saw_special, expected);
    }

    #[test]
    fn elapsed_time_tracks_clock() {
        let mut state = new_state(Variant::Enhanced);
        state.clock.advance(Duration::from_millis(3500));
        state.tick();
        assert_eq!(state.elapsed_secs(), 3);
        state.clock.advance(Duration::from_millis(600));
        state.tick();
        assert_eq!(state.elapsed_secs(), 4);
        state.set_game_over();
        state.apply_input(InputEvent::RestartPressed);
        assert_eq!(state.elapsed_secs(), 0);
    }

    #[test]
    fn basic_does_not_track_time() {
        let mut state = new_state(Variant::Basic);
        state.clock.advance(Duration::from_secs(10));
        state.tick();
        assert_eq!(state.elapsed_secs(), 0);
    }

    #[test]
    fn unusable_store_does_not_stop_play() {
        let tmpdir = tempdir().unwrap();
        // A directory can be neither read nor written as a file
        let store = HighScoreFile::new(tmpdir.path().to_path_buf());
        let mut state = new_state_with_store(Variant::Enhanced, store);
        assert_eq!(state.high_score(), 0);
        feed(&mut state, FruitKind::Blueberry);
        state.tick();
        assert_eq!(state.score(), 4);
        assert_eq!(state.high_score(), 4);
    }

    #[test]
    fn corrupt_store_loads_zero() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("high_score.json");
        fs_err::write(&path, "{\"high_score\": ").unwrap();
        let state = new_state_with_store(Variant::Enhanced, HighScoreFile::new(path));
        assert_eq!(state.high_score(), 0);
    }
}
