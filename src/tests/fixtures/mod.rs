pub mod persisters;
pub mod quotations;
pub mod state;
