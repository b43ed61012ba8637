pub mod anchor;
pub mod blend;
pub mod canvas;
pub mod vector;
