pub mod command_executor;
pub mod command_line;

pub use command_executor::{
    CommandExecutorError,
    CommandRunner,
    ExecutionResult,
    LocalCommandRunner,
};
pub use command_line::{Arg, CommandLine};

#[cfg(test)]
pub use command_executor::MockCommandRunner;
