use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use wxdash_core::{AppError, Config, GlyphStyle};
use wxdash_ui::{render_text, DashboardState, DashboardView, FetchState, RenderOptions, RunOptions};
use wxdash_weather::{Coordinate, Locator};

#[derive(FromArgs)]
/// Current conditions and 7-day outlook from the National Weather Service
struct Args {
    /// latitude of the position to show (requires --lon)
    #[argh(option)]
    lat: Option<f64>,

    /// longitude of the position to show (requires --lat)
    #[argh(option)]
    lon: Option<f64>,

    /// do not look up the device position; stay on the fallback coordinate
    #[argh(switch)]
    no_locate: bool,

    /// print the dashboard state as JSON
    #[argh(switch)]
    json: bool,

    /// print each period's detailed forecast
    #[argh(switch)]
    details: bool,

    /// use plain ASCII labels instead of weather glyphs
    #[argh(switch)]
    ascii: bool,

    /// print every intermediate state, not just the final one
    #[argh(switch)]
    progressive: bool,

    /// path to the configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            let message = e
                .downcast_ref::<AppError>()
                .map(AppError::user_message)
                .unwrap_or("wxdash could not start.");
            eprintln!("{}\n  {:#}", message, e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let (config, validation) = Config::load_validated(args.config.as_deref())?;

    wxdash_core::init(&config.logging.level)?;
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let mut options = RunOptions::from_config(&config)?;
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => options.locator = Locator::Fixed(Coordinate::new(lat, lon)),
        (None, None) if args.no_locate => options.locator = Locator::Disabled,
        (None, None) => {}
        _ => bail!("--lat and --lon must be given together"),
    }

    let mut render = RenderOptions::from(&config.ui);
    if args.ascii {
        render.glyphs = GlyphStyle::Ascii;
    }
    render.show_details |= args.details;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    tracing::info!(fallback = %options.fallback, "wxdash starting");

    let progressive = args.progressive && !args.json;
    let state = runtime.block_on(wxdash_ui::run(&config, options, |state| {
        if progressive {
            println!("{}", render_text(&DashboardView::from_state(state), &render));
        }
    }))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state).context("Failed to serialize dashboard")?
        );
    } else if !progressive {
        print!("{}", render_text(&DashboardView::from_state(&state), &render));
    }

    Ok(exit_code(&state))
}

fn exit_code(state: &DashboardState) -> ExitCode {
    match state.status {
        FetchState::Failed { .. } => ExitCode::from(2),
        _ => ExitCode::SUCCESS,
    }
}
