pub mod lifetime;
pub mod sweeper;
