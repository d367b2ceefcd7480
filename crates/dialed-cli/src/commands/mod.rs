pub mod history;
pub mod input;
pub mod league;
pub mod practice;
pub mod release;
pub mod settings;
pub mod stats;
pub mod world;
