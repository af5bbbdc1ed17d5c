//! A played-out sequence of moves from some starting position, with
//! unlimited undo: a history list plus a log of the numbers played, where
//! the initial position is never removed by `undo`.

use crate::error::SylverError;
use crate::position::Position;

pub struct Game {
    history: Vec<Position>,
    numbers_played: Vec<u64>,
}

impl Game {
    /// Starts a new game at `position`.
    pub fn new(position: Position) -> Self {
        Game {
            history: vec![position],
            numbers_played: Vec::new(),
        }
    }

    /// The current position.
    pub fn state(&self) -> &Position {
        self.history.last().expect("history is never empty")
    }

    /// The full sequence of moves played so far.
    pub fn numbers_played(&self) -> &[u64] {
        &self.numbers_played
    }

    /// Plays `n` from the current position, pushing the result onto the
    /// history.
    pub fn play(&mut self, n: u64) -> Result<(), SylverError> {
        let next = self.state().add(n)?;
        self.history.push(next);
        self.numbers_played.push(n);
        Ok(())
    }

    /// Rolls back to the previous position. A no-op at the start of the
    /// game: the initial position is never removed, so undo is safe to
    /// call any number of times.
    pub fn undo(&mut self) {
        if self.history.len() == 1 {
            return;
        }
        self.history.pop();
        self.numbers_played.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_advances_state_and_log() {
        let mut game = Game::new(Position::construct(&[7], None).unwrap());
        game.play(5).unwrap();
        assert_eq!(game.numbers_played(), &[5]);
        assert!(game.state().is_member(5));
    }

    #[test]
    fn undo_reverts_to_prior_state() {
        let mut game = Game::new(Position::construct(&[7], None).unwrap());
        let initial = game.state().clone();
        game.play(5).unwrap();
        game.undo();
        assert_eq!(game.state(), &initial);
        assert!(game.numbers_played().is_empty());
    }

    #[test]
    fn undo_at_start_is_a_noop() {
        let mut game = Game::new(Position::construct(&[7], None).unwrap());
        game.undo();
        game.undo();
        assert_eq!(game.numbers_played().len(), 0);
        assert_eq!(game.state(), &Position::construct(&[7], None).unwrap());
    }

    #[test]
    fn invalid_move_leaves_game_unchanged() {
        let mut game = Game::new(Position::construct(&[7], None).unwrap());
        let before = game.state().clone();
        let err = game.play(0);
        assert!(err.is_err());
        assert_eq!(game.state(), &before);
    }
}
