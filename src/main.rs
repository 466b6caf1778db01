use std::process::ExitCode;
use std::sync::Arc;

use miette::Result;

use laret::commands::build_app;
use laret::config::{AppConfig, ConfigLoader, ConfigValidator};
use laret::core::{utf8_args, LogManager};
use laret::plugin::LoggingPlugin;
use laret::ui;

fn main() -> Result<ExitCode> {
    // Reset SIGPIPE so piping into `head` terminates quietly instead of panicking
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let args = match utf8_args(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            ui::error(&err.to_string());
            return Ok(ExitCode::from(2));
        }
    };

    let loader = ConfigLoader::new();
    let config = load_config(&loader)?;
    let mut app = build_app();

    match LogManager::install(&config.logging) {
        Ok(manager) => {
            app.set_log_manager(manager);
        }
        Err(err) => ui::warning(&err.to_string()),
    }

    if config.plugins.is_enabled(LoggingPlugin::NAME) {
        app.register_plugin(Arc::new(LoggingPlugin::new()));
    }
    app.apply_config(&config);

    app.enter_mode(&args);
    match loader.source(None) {
        Some(path) => tracing::info!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file found, using defaults"),
    }

    let outcome = app.run(&args);

    Ok(ExitCode::from(outcome.exit_code()))
}

/// Loaded configuration, or defaults when the loaded file fails validation
fn load_config(loader: &ConfigLoader) -> Result<AppConfig> {
    let config = loader.load(None)?;
    let result = ConfigValidator::new().validate(&config);

    for warning in &result.warnings {
        ui::warning(warning);
    }
    if result.valid {
        return Ok(config);
    }

    for error in &result.errors {
        ui::error(error);
    }
    ui::warning("Ignoring invalid configuration, using defaults");
    Ok(AppConfig::default())
}
