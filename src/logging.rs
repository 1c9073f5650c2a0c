use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

pub fn default_level(verbose: bool, quiet: bool) -> LevelFilter {
    match (verbose, quiet) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Warn,
        (false, false) => LevelFilter::Info,
    }
}

/// Installs the global logger. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = default_level(verbose, quiet).to_string().to_ascii_lowercase();
    let logging_env = Env::default().filter_or("RUST_LOG", level);
    Builder::from_env(logging_env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
