//! Command-line interface.

mod args;

pub use args::{Cli, Commands, MigrateAction, MigrateArgs, SeedArgs, ServeArgs};
