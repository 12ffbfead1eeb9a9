use crate::*;
pub use mines::*;
pub use puzzle::*;

mod mines;
mod puzzle;

pub trait MineLayoutGenerator {
    fn generate(self, size: Coord2, mines: CellCount) -> MineLayout;
}
