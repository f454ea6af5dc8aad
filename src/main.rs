use anyhow::Result;
use message_navigator::cli;

fn main() -> Result<()> {
    cli::run()
}
