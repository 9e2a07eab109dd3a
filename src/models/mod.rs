pub mod grid;
pub mod program;
pub mod request;

pub use grid::{Grid, GridError};
pub use program::{ClassificationTag, DayEntry, DayPlan, ExerciseRecord, ProgramTree, WeekPlan};
pub use request::{EditTarget, Field, WriteBackRequest, WriteBackResponse};
