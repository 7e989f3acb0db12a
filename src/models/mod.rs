pub mod item_model;
