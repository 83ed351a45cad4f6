use std::collections::{HashMap, VecDeque};
use std::io;

use snake_arena::game::{Controls, Game, GameOutcome, InputSource, Renderer};
use snake_arena::{Collision, Config, Coords, Direction, Simulation};

#[derive(Default)]
struct ScriptedInput {
    keys: VecDeque<Option<char>>,
}

impl ScriptedInput {
    fn push(&mut self, key: char) {
        self.keys.push_back(Some(key));
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> io::Result<Option<char>> {
        Ok(self.keys.pop_front().flatten())
    }
}

#[derive(Default)]
struct Screen {
    cells: HashMap<Coords, char>,
    flushes: usize,
}

impl Screen {
    fn at(&self, pos: Coords) -> char {
        self.cells.get(&pos).copied().unwrap_or(' ')
    }
}

impl Renderer for Screen {
    fn draw(&mut self, pos: Coords, symbol: char) -> io::Result<()> {
        self.cells.insert(pos, symbol);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

fn open_field() -> Config {
    let mut cfg = Config::default();
    cfg.obstacles.enabled = false;
    cfg.items.enabled = false;
    cfg.seed = Some(42);
    cfg
}

fn new_game(cfg: &Config) -> Game<ScriptedInput, Screen> {
    let sim = Simulation::new(cfg).unwrap();
    let mut game = Game::new(sim, Controls::new(cfg.keys.clone()), ScriptedInput::default(), Screen::default());
    game.draw_board().unwrap();
    game
}

fn key_for(dir: Direction) -> char {
    match dir {
        Direction::Up => 'z',
        Direction::Down => 's',
        Direction::Left => 'q',
        Direction::Right => 'd',
    }
}

#[test]
fn board_is_drawn_once_up_front() {
    let game = new_game(&open_field());
    let screen = game.renderer();

    assert_eq!(screen.at((1, 1)), '#');
    assert_eq!(screen.at((80, 39)), '#');
    assert_eq!(screen.at((1, 20)), ' ');
    assert_eq!(screen.at((40, 1)), ' ');
    assert_eq!(screen.at((40, 20)), 'O');
    assert_eq!(screen.at((31, 20)), 'X');
    assert_eq!(screen.at((30, 20)), ' ');
    assert_eq!(screen.flushes, 1);
}

#[test]
fn thirty_quiet_ticks_then_stop() {
    let mut game = new_game(&open_field());

    for _ in 0..30 {
        assert_eq!(game.tick().unwrap(), None);
    }
    assert_eq!(game.sim().snake().head(), (70, 20));

    let screen = game.renderer();
    assert_eq!(screen.at((70, 20)), 'O');
    assert_eq!(screen.at((69, 20)), 'X');
    assert_eq!(screen.at((61, 20)), 'X');
    assert_eq!(screen.at((60, 20)), ' ');
    assert_eq!(screen.at((40, 20)), ' ');

    game.input_mut().push('a');
    assert_eq!(game.tick().unwrap(), Some(GameOutcome::Stopped));
    assert_eq!(game.sim().snake().head(), (70, 20));
    assert_eq!(game.score(), 0);
}

#[test]
fn reversal_and_unknown_keys_are_ignored() {
    let mut game = new_game(&open_field());

    game.input_mut().push('q');
    game.input_mut().push('p');
    game.input_mut().push('Q');
    for _ in 0..3 {
        assert_eq!(game.tick().unwrap(), None);
    }

    assert_eq!(game.sim().snake().direction(), Direction::Right);
    assert_eq!(game.sim().snake().head(), (43, 20));
}

#[test]
fn turning_changes_course() {
    let mut game = new_game(&open_field());

    game.input_mut().push('z');
    game.tick().unwrap();
    game.tick().unwrap();

    assert_eq!(game.sim().snake().head(), (40, 18));
    assert_eq!(game.renderer().at((40, 18)), 'O');
    assert_eq!(game.renderer().at((40, 19)), 'X');
    assert_eq!(game.renderer().at((40, 20)), 'X');
}

#[test]
fn crash_into_the_wall() {
    let mut cfg = open_field();
    cfg.start = (77, 10);
    let mut game = new_game(&cfg);

    assert_eq!(game.tick().unwrap(), None);
    assert_eq!(game.tick().unwrap(), None);
    assert_eq!(game.tick().unwrap(), Some(GameOutcome::Collided(Collision::Wall)));
    // The head is not drawn over the wall.
    assert_eq!(game.renderer().at((80, 10)), '#');
}

#[test]
fn through_the_right_portal() {
    let mut cfg = open_field();
    cfg.start = (75, 20);
    cfg.initial_length = 3;
    let mut game = new_game(&cfg);

    for _ in 0..7 {
        assert_eq!(game.tick().unwrap(), None);
    }
    assert_eq!(game.sim().snake().head(), (3, 20));
    assert_eq!(game.sim().snake().body(), &[(3, 20), (2, 20), (1, 20)]);
    assert_eq!(game.renderer().at((80, 20)), ' ');
}

#[test]
fn eating_every_item_wins() {
    let mut cfg = open_field();
    cfg.items.enabled = true;
    cfg.items.target = 3;
    cfg.initial_length = 1;
    let mut game = new_game(&cfg);
    let start_interval = game.sim().interval();

    let mut outcome = None;
    for _ in 0..1000 {
        let head = game.sim().snake().head();
        let item = game.sim().item().unwrap();
        let current = game.sim().snake().direction();

        let wanted = if item.0 > head.0 {
            Direction::Right
        } else if item.0 < head.0 {
            Direction::Left
        } else if item.1 > head.1 {
            Direction::Down
        } else {
            Direction::Up
        };
        // Sidestep towards the middle instead of reversing.
        let wanted = if wanted == current.opposite() {
            match current {
                Direction::Left | Direction::Right if head.1 < 20 => Direction::Down,
                Direction::Left | Direction::Right => Direction::Up,
                _ if head.0 < 40 => Direction::Right,
                _ => Direction::Left,
            }
        } else {
            wanted
        };
        game.input_mut().push(key_for(wanted));

        outcome = game.tick().unwrap();
        if outcome.is_some() {
            break;
        }
    }

    assert_eq!(outcome, Some(GameOutcome::Won));
    assert_eq!(game.score(), 3);
    assert_eq!(game.sim().snake().len(), 4);
    assert_eq!(game.sim().item(), None);
    assert!(game.sim().interval() < start_interval);
    assert_eq!(game.renderer().at(game.sim().snake().head()), 'O');
}
