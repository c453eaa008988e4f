// Shared models for the college football line pipeline

pub mod enriched;
pub mod lines;
pub mod team;

pub use enriched::{EnrichedGameLine, FlatGameLine, ScheduledGameLine, WinProbabilities};
pub use lines::{GameInfo, GameLine, GameLines, Moneyline, SeasonType, WeeklyLinesRequest};
pub use team::Team;

/// Any pipeline record that knows which game it describes.
pub trait GameRecord {
    fn game(&self) -> &GameInfo;
}

/// Any pipeline record carrying a single adopted line.
pub trait LineRecord {
    fn line_mut(&mut self) -> &mut GameLine;
}

impl GameRecord for GameLines {
    fn game(&self) -> &GameInfo {
        &self.game
    }
}

impl GameRecord for FlatGameLine {
    fn game(&self) -> &GameInfo {
        &self.game
    }
}

impl GameRecord for ScheduledGameLine {
    fn game(&self) -> &GameInfo {
        &self.game
    }
}

impl GameRecord for EnrichedGameLine {
    fn game(&self) -> &GameInfo {
        &self.game
    }
}

impl LineRecord for FlatGameLine {
    fn line_mut(&mut self) -> &mut GameLine {
        &mut self.line
    }
}

impl LineRecord for ScheduledGameLine {
    fn line_mut(&mut self) -> &mut GameLine {
        &mut self.line
    }
}

impl LineRecord for EnrichedGameLine {
    fn line_mut(&mut self) -> &mut GameLine {
        &mut self.line
    }
}
