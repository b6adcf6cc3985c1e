use std::path::{Path, PathBuf};

/// Runtime config options, shared by all commands.
#[derive(Clone, Debug)]
pub struct CoreOptions {
    /// The directory relative paths of the configuration are resolved against.
    pub working_directory: PathBuf,
}

/// Runtime config for the core project.
#[derive(Clone, Debug)]
pub struct RtcCore {
    pub working_directory: PathBuf,
}

impl RtcCore {
    pub(super) fn new(opts: CoreOptions) -> Self {
        let CoreOptions { working_directory } = opts;
        Self { working_directory }
    }

    /// Resolve a path from the configuration against the working directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.working_directory.join(path)
    }

    #[cfg(test)]
    pub(crate) fn new_test() -> Self {
        RtcCore {
            working_directory: PathBuf::from("/srv/site"),
        }
    }
}
