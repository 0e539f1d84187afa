//! Section collectors: run the diagnostic commands for one domain and
//! normalize their output into a record.
//!
//! Every collector is infallible. Command failures degrade to unknown fields
//! (or an absent record) and leave a [`Hint`] behind when privileges are the
//! likely cause.

pub mod audio;
pub mod bluetooth;
pub mod graphics;
pub mod hardware;
pub mod network;
pub mod power;
pub mod storage;

use crate::data::{Hint, Section};
use crate::error::CommandError;
use crate::profiler::ProfilerBlock;
use crate::utils::command::CommandRunner;
use tracing::{debug, warn};

/// Run `system_profiler <data_type>` and parse it into a tree.
pub(crate) fn system_profiler(
    runner: &dyn CommandRunner,
    data_type: &str,
) -> Result<ProfilerBlock, CommandError> {
    runner
        .run("system_profiler", &[data_type])
        .map(|text| ProfilerBlock::parse(&text))
}

/// `sysctl -n <key>`, trimmed; `None` when the key is missing or empty.
pub(crate) fn sysctl(runner: &dyn CommandRunner, key: &str) -> Option<String> {
    match runner.run("sysctl", &["-n", key]) {
        Ok(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
        Err(err) => {
            debug!(key, error = %err, "sysctl lookup failed");
            None
        }
    }
}

/// Log a failed command and remember privilege problems for the CLI.
pub(crate) fn record_failure(
    hints: &mut Vec<Hint>,
    section: Section,
    command: &str,
    err: &CommandError,
) {
    if err.is_permission_denied() {
        warn!(%section, command, "permission denied, section will be incomplete");
        let hint = Hint::RequiresPrivileges {
            section,
            command: command.to_string(),
        };
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    } else {
        debug!(%section, command, error = %err, "command failed");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned command output for collector tests.

    use crate::error::CommandError;
    use crate::utils::command::CommandRunner;
    use std::cell::RefCell;
    use std::collections::HashMap;

    enum Canned {
        Output(String),
        Denied,
    }

    /// Answers commands from a table keyed by the full command line.
    /// Anything not in the table behaves like a missing binary.
    #[derive(Default)]
    pub struct FakeRunner {
        outputs: HashMap<String, Canned>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        pub fn with(mut self, command: &str, output: &str) -> Self {
            self.outputs
                .insert(command.to_string(), Canned::Output(output.to_string()));
            self
        }

        pub fn denied(mut self, command: &str) -> Self {
            self.outputs.insert(command.to_string(), Canned::Denied);
            self
        }

        pub fn called(&self, command: &str) -> bool {
            self.calls.borrow().iter().any(|c| c == command)
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
            let key = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.borrow_mut().push(key.clone());
            match self.outputs.get(&key) {
                Some(Canned::Output(text)) => Ok(text.clone()),
                Some(Canned::Denied) => Err(CommandError::PermissionDenied(program.to_string())),
                None => Err(CommandError::NotFound(program.to_string())),
            }
        }
    }
}
