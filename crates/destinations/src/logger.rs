use log::LevelFilter;

fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Log to stderr at a level chosen by the number of `-v` flags.
///
/// `RUST_LOG` takes precedence over the flags.
pub fn init(verbosity: u8, debug: bool) {
    let mut level = level(verbosity);
    // The client logs requests and responses at the debug level when asked to.
    if debug {
        level = level.max(LevelFilter::Debug);
    }
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
