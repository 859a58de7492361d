pub mod event;
pub mod scene;
pub mod timer;
pub mod wizard;
