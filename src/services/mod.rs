pub mod command_router;
pub mod commands;
pub mod focus_controller;
pub mod input_simulator;
pub mod keycode_map;

pub use command_router::{CommandContext, CommandTable};
pub use focus_controller::FocusController;
pub use input_simulator::InputSimulator;
