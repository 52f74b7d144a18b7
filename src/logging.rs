// Console logging for the viewer (the library only talks to the `log` facade).

use delaygrab::{Error, Result};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// Route `log` records at `level` and above to stderr.
pub fn init_log(level: LevelFilter) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l:<5})} {t} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| Error::LogInit(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| Error::LogInit(e.to_string()))?;
    Ok(())
}
