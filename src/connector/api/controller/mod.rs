mod predict_controller;

pub use predict_controller::*;
