//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

pub fn init_logger() -> Result<(), log::SetLoggerError> {
    let colors = fern::colors::ColoredLevelConfig::new()
        .info(fern::colors::Color::Green)
        .debug(fern::colors::Color::Yellow)
        .error(fern::colors::Color::Red);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339(std::time::SystemTime::now()),
                record.metadata().target(),
                colors.color(record.level()),
                message
            ))
        })
        .filter(|metadata| metadata.target().starts_with("ticket_office"))
        .level(log::LevelFilter::Info)
        // Logs go to stderr; stdout is reserved for command output
        .chain(std::io::stderr())
        .apply()
}
