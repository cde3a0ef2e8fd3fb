pub mod script_input;

pub use script_input::ScriptInput;
