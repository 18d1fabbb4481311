use crate::cli::{Cli, Command};
use crate::error::Result;

pub mod platform;
pub mod platforms;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Platform(args) => platform::run(args).await,
        Command::Platforms(args) => platforms::run(args),
    }
}
