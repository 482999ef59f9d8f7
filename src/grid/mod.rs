mod search;
pub mod sort;
mod state;

pub use search::matches_search;
pub use sort::{
    CellValue,
    Column,
    SortDirection,
};
pub use state::GridState;
