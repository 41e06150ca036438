pub mod decision;
pub mod instance;
pub mod process;

pub use decision::{Decision, Severity};
pub use instance::{InstanceStatus, RegisteredInstance};
pub use process::{ProcessRecord, Uptime, PMON_PREFIX};
