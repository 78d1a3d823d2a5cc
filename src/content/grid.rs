//! Word-search grid placement
//!
//! Words are placed by bounded random trials: pick a start cell and one of
//! three directions, check bounds and letter conflicts, write on success.
//! A word that fails every trial is dropped and reported in
//! `WordSearch::dropped`. Letters shared at a crossing are allowed.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rows and columns of the puzzle grid
pub const GRID_SIZE: usize = 10;

/// Random trials per word before it is dropped
pub const MAX_PLACEMENT_TRIALS: usize = 100;

/// Letters used to fill the cells no word occupies
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Direction a word runs in; reverse directions are not used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right, step (0, 1)
    Horizontal,
    /// Top to bottom, step (1, 0)
    Vertical,
    /// Top-left to bottom-right, step (1, 1)
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Horizontal, Direction::Vertical, Direction::Diagonal];

    /// (row, column) step
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
        }
    }
}

/// A word written into the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    /// [row, column] of the first letter
    pub start: [usize; 2],
    /// [row, column] of the last letter
    pub end: [usize; 2],
    pub direction: Direction,
}

impl Placement {
    /// Cells covered by the word, first letter first
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let (dr, dc) = self.direction.step();
        (0..self.word.chars().count())
            .map(|i| (self.start[0] + i * dr, self.start[1] + i * dc))
            .collect()
    }
}

/// R×C matrix of optional letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Letter at (row, col); `None` when empty or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    fn set(&mut self, row: usize, col: usize, letter: char) {
        self.cells[row * self.cols + col] = Some(letter);
    }

    /// True when every cell holds a letter
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Row-major string matrix; empty cells become ""
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(String::from).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// A finished puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSearch {
    pub grid: Grid,
    pub answers: Vec<Placement>,
    /// Words that could not be placed, in input order
    pub dropped: Vec<String>,
}

/// Places words into a grid, then fills the remaining cells
pub struct GridPlacer<R: Rng> {
    grid: Grid,
    placements: Vec<Placement>,
    dropped: Vec<String>,
    rng: R,
}

impl<R: Rng> GridPlacer<R> {
    pub fn new(rows: usize, cols: usize, rng: R) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            placements: Vec::new(),
            dropped: Vec::new(),
            rng,
        }
    }

    /// A `GRID_SIZE` × `GRID_SIZE` placer
    pub fn standard(rng: R) -> Self {
        Self::new(GRID_SIZE, GRID_SIZE, rng)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Try to place `word` with up to `MAX_PLACEMENT_TRIALS` random trials
    ///
    /// Returns the placement on success. On failure the word is recorded as
    /// dropped and the grid is left unchanged.
    pub fn place(&mut self, word: &str) -> Option<&Placement> {
        if word.is_empty() || self.grid.rows == 0 || self.grid.cols == 0 {
            self.dropped.push(word.to_string());
            return None;
        }

        for _ in 0..MAX_PLACEMENT_TRIALS {
            let start = (
                self.rng.gen_range(0..self.grid.rows),
                self.rng.gen_range(0..self.grid.cols),
            );
            let direction = *Direction::ALL
                .choose(&mut self.rng)
                .unwrap_or(&Direction::Horizontal);

            if self.try_place_at(word, start, direction) {
                return self.placements.last();
            }
        }

        tracing::debug!(word, trials = MAX_PLACEMENT_TRIALS, "dropping word that did not fit");
        self.dropped.push(word.to_string());
        None
    }

    /// Place `word` at `start` running in `direction` if it fits
    ///
    /// Fits means the last letter is inside the grid and every covered cell
    /// is empty or already holds the required letter.
    pub fn try_place_at(&mut self, word: &str, start: (usize, usize), direction: Direction) -> bool {
        let letters: Vec<char> = word.chars().collect();
        if letters.is_empty() {
            return false;
        }

        let (dr, dc) = direction.step();
        let (row, col) = start;
        if row >= self.grid.rows || col >= self.grid.cols {
            return false;
        }

        let span = letters.len() - 1;
        let end = (row + span * dr, col + span * dc);
        if end.0 >= self.grid.rows || end.1 >= self.grid.cols {
            return false;
        }

        let fits = letters.iter().enumerate().all(|(i, &letter)| {
            match self.grid.get(row + i * dr, col + i * dc) {
                None => true,
                Some(existing) => existing == letter,
            }
        });
        if !fits {
            return false;
        }

        for (i, &letter) in letters.iter().enumerate() {
            self.grid.set(row + i * dr, col + i * dc, letter);
        }
        self.placements.push(Placement {
            word: word.to_string(),
            start: [row, col],
            end: [end.0, end.1],
            direction,
        });
        true
    }

    /// Fill every empty cell with a random letter and return the puzzle
    pub fn finish(mut self) -> WordSearch {
        for index in 0..self.grid.cells.len() {
            if self.grid.cells[index].is_none() {
                let letter = ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char;
                self.grid.cells[index] = Some(letter);
            }
        }

        WordSearch {
            grid: self.grid,
            answers: self.placements,
            dropped: self.dropped,
        }
    }
}

/// Place `words` in order on a standard grid and fill the rest
pub fn build_word_search<R: Rng>(words: &[String], rng: R) -> WordSearch {
    let mut placer = GridPlacer::standard(rng);
    for word in words {
        placer.place(word);
    }
    placer.finish()
}
