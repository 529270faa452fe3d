use clap::Parser;
use crossterm::terminal;
use fog_grid::{
    cli::Args,
    display::render_app,
    lifecycle::Lifecycle,
    terminal::{restore_terminal, setup_terminal, Tui},
    App, AppConfig, FogResult,
};
use log::{error, info};
use std::fs::File;

fn init_logging(args: &Args) -> FogResult<()> {
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            // anything written to stderr tears through the alternate screen
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
                .init();
        }
    }
    Ok(())
}

/// Terminal pixel size, when the terminal reports one
fn probe_pixels() -> Option<(u32, u32)> {
    match terminal::window_size() {
        Ok(size) if size.width > 0 && size.height > 0 => Some((size.width as u32, size.height as u32)),
        _ => None,
    }
}

fn run(terminal: &mut Tui, config: AppConfig) -> FogResult<()> {
    let size = terminal.size()?;
    let tick_interval = config.tick_interval();
    let mut app = App::with_pixel_probe(config, (size.width, size.height), Box::new(probe_pixels));

    // mount: timer and input listener live exactly as long as this loop
    let lifecycle = Lifecycle::start(tick_interval);
    terminal.draw(|f| render_app(f, &app))?;

    loop {
        // everything that queued up during the last draw goes into one frame
        for event in lifecycle.next_batch()? {
            app.handle_event(event);
        }
        if app.should_quit {
            break;
        }
        terminal.draw(|f| render_app(f, &app))?;
    }

    lifecycle.stop();
    info!(
        "stopped after {} ticks, {} falls landed",
        app.monitor.metrics().total_ticks,
        app.monitor.metrics().falls_landed
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;
    let config = AppConfig::from_args(&args)?;
    info!("starting with {:?}", config);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, config);
    // restore even when the loop failed, then report
    if let Err(e) = restore_terminal(&mut terminal) {
        error!("failed to restore terminal: {}", e);
    }
    result?;
    Ok(())
}
