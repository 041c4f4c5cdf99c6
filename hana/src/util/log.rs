use simplelog::{Color, ColorChoice, ConfigBuilder, Level, LevelFilter, TermLogger, TerminalMode};

/// Installs a terminal logger for the `log` facade, showing records
/// up to `level` without location, target or thread prefixes.
/// Fails if a logger is already installed.
pub fn init_simple_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_level_color(Level::Debug, Some(Color::Cyan))
        .set_level_color(Level::Trace, Some(Color::Green))
        .build();

    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}
