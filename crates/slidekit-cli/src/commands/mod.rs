pub mod config;
pub mod deck;
pub mod run;
pub mod simulate;
