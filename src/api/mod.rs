pub mod dtos;
pub mod items_client;
