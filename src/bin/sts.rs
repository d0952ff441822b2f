use teamscatter::app::{self, Algorithm};
use teamscatter::cli::{self, RunArgs};

fn main() {
    let args: RunArgs = cli::parse_or_usage();
    app::init_tracing();
    app::run(Algorithm::SymmetricTeamScatter, &args);
}
