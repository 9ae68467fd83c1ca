pub mod agenda;
pub mod io;
pub mod model;
pub mod render;
