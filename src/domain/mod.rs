pub mod anim;
pub mod console;
pub mod desktop;
pub mod fortune;
pub mod geometry;
pub mod screen;
