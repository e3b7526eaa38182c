pub use commands::*;
pub use port::MountPort;
pub use session::MountSetupSession;

mod commands;
mod port;
mod session;
#[cfg(test)]
pub(in crate::mount_control) mod test_util;
