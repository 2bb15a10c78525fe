//! Timer-driven loops.

pub mod mission_loop;
