pub mod app;
pub mod item_board;
pub mod region;
