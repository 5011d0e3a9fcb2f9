use clap::Parser;
use sea_orm_cli::MigrateSubcommands;

/// Apply or revert the `teams` and `submissions` schema.
///
/// Running without a subcommand applies every pending migration.
#[derive(Parser)]
#[clap(name = "migration")]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Option<MigrateSubcommands>,
}
