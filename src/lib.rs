//! A tiny Flappy Bird minigame for the terminal: gravity, gap pipes, a
//! score counter, and a fireworks volley every ten points.
//!
//! The game simulates a fixed 800x600 playfield and scales it to whatever
//! the terminal provides, so the physics feel identical at any window size.

pub mod audio;
pub mod fireworks;
pub mod game;
pub mod input;
pub mod render;
