pub mod display;
pub mod simulation;
