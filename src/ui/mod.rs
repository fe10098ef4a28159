//! egui rendering: panels and tab bodies in `panels`, charts in `plot`.

pub mod panels;
pub mod plot;
