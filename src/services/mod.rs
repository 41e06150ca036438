pub mod elapsed;
pub mod listener;
pub mod platform;
pub mod process_checker;
pub mod reconciler;
pub mod registry;
pub mod runner;

pub use listener::is_listener_running;
pub use platform::{detect_platform, source_for, ProcessSource};
pub use reconciler::{reconcile, Snapshot};
pub use registry::read_registry;
pub use runner::{CommandRunner, SystemRunner};
