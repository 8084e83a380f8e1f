pub mod commands;
pub mod controller;
pub mod scanner;
pub mod twelvedata;
pub mod workflow;

pub use commands::{Command, CommandError, CommandLoop, HELP_TEXT};
pub use controller::ScanController;
pub use scanner::Scanner;
pub use twelvedata::TwelveDataClient;
pub use workflow::{CycleOutcome, PairWorkflow, WorkflowSettings};
