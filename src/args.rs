use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(
    display_name = "pp-recalc",
    about = "Recalculates an osu! player's top plays with a local pp model",
    long_about = "Fetches a player's top plays from the osu! API, recomputes each play's pp \
    with a locally-run difficulty/performance model and reports per-play rank and pp \
    differences against the server-reported values."
)]
pub struct Args {
    /// Profile to recalculate. Either a numeric user id or a username.
    pub profile: String,

    /// OAuth client id for the osu! API (https://osu.ppy.sh/home/account/edit#oauth)
    #[arg(long, env = "OSU_CLIENT_ID", help = "osu! API OAuth client id")]
    pub client_id: u64,

    /// OAuth client secret paired with the client id
    #[arg(
        long,
        env = "OSU_CLIENT_SECRET",
        hide_env_values = true,
        help = "osu! API OAuth client secret"
    )]
    pub client_secret: String,

    /// Ruleset to recalculate for
    #[arg(
        short,
        long,
        default_value_t = 0,
        help = "Ruleset: 0 = osu!, 1 = taiko, 2 = catch, 3 = mania"
    )]
    pub ruleset: i32,

    /// Emits the report as a structured JSON document instead of a table
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,

    /// Writes the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
