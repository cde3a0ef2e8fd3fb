use std::collections::VecDeque;

use crate::controllers::interactive::input_command::{InputCommand, InputCommandError};
use crate::controllers::interactive::ports::input_source::InputSource;

/// Replays a fixed list of commands, one per tick, then quits.
#[derive(Debug, Clone, Default)]
pub struct ScriptInput {
    commands: VecDeque<InputCommand>,
}

impl ScriptInput {
    #[must_use]
    pub fn new(commands: Vec<InputCommand>) -> Self {
        Self {
            commands: commands.into(),
        }
    }

    /// Parses a comma or whitespace separated list such as `"zoom-in, left, -"`.
    pub fn parse(script: &str) -> Result<Self, InputCommandError> {
        let commands = script
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse::<InputCommand>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(commands))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputSource for ScriptInput {
    fn poll(&mut self) -> Vec<InputCommand> {
        match self.commands.pop_front() {
            Some(command) => vec![command],
            None => vec![InputCommand::Quit],
        }
    }
}
