use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pixel_core::{
    accept, ConfigRejected, Configuration, CopyRequest, DisplayWindow, FieldKind, FieldRegistry,
    FieldVisibility, RefreshLoop,
};
use pixel_platform::{
    set_dpi_aware, start_copy_hotkey, CopyHotkeyHandle, NativeSurface, ScreenSampler,
    SystemClipboard,
};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "pixel-details",
    version,
    about = "Show the position and color of the pixel under the mouse pointer"
)]
struct Cli {
    /// Hide a field (repeatable).
    #[arg(long = "hide", value_enum, value_name = "FIELD")]
    hide: Vec<FieldArg>,

    /// Hide the color swatch.
    #[arg(long)]
    no_swatch: bool,

    /// Keep the window in place instead of following the cursor.
    #[arg(long)]
    fixed: bool,

    /// Copy values without their labels.
    #[arg(long)]
    no_labels: bool,

    /// Only react to the copy shortcut while the window has focus.
    #[arg(long)]
    no_global_hotkey: bool,

    /// Minimum time between refreshes in milliseconds (0 = as fast as possible).
    #[arg(long, value_name = "N", default_value_t = 0)]
    interval_ms: u64,

    /// Debug logging.
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FieldArg {
    Coordinates,
    Rgb,
    Hsv,
    Hex,
}

impl From<FieldArg> for FieldKind {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Coordinates => FieldKind::Coordinates,
            FieldArg::Rgb => FieldKind::Rgb,
            FieldArg::Hsv => FieldKind::Hsv,
            FieldArg::Hex => FieldKind::Hex,
        }
    }
}

impl Cli {
    fn configuration(&self) -> Configuration {
        let mut fields = FieldVisibility::all();
        for hidden in &self.hide {
            fields.set((*hidden).into(), false);
        }
        Configuration {
            fields,
            show_swatch: !self.no_swatch,
            dynamic_placement: !self.fixed,
            include_labels_on_copy: !self.no_labels,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "pixel_details=debug,pixel_core=debug,pixel_platform=debug"
    } else {
        "pixel_details=info,pixel_core=info,pixel_platform=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .try_init();
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match accept(Some(cli.configuration())) {
        Ok(config) => config,
        Err(ConfigRejected::NothingToShow) => {
            info!("Nothing selected to show; exiting");
            return Ok(());
        }
        Err(ConfigRejected::Cancelled) => return Ok(()),
    };

    set_dpi_aware();
    let sampler = ScreenSampler::new().context("cannot read the screen")?;

    let copy_request = CopyRequest::new();
    let _hotkey = start_global_hotkey(&cli, &copy_request);

    let registry = FieldRegistry::standard();
    let window = DisplayWindow::construct(&config, &registry, copy_request, NativeSurface::open)
        .context("failed to open the display window")?;

    let report = RefreshLoop::new(config, registry, sampler, window, SystemClipboard::new())
        .with_pacing(Duration::from_millis(cli.interval_ms))
        .run()
        .context("refresh loop stopped")?;

    info!(
        iterations = report.iterations,
        copies = report.copies,
        "pixel-details finished"
    );
    Ok(())
}

fn start_global_hotkey(cli: &Cli, request: &CopyRequest) -> Option<CopyHotkeyHandle> {
    if cli.no_global_hotkey {
        info!("Global copy hotkey disabled");
        return None;
    }
    match start_copy_hotkey(request.clone()) {
        Ok(handle) => {
            info!(running = handle.is_running(), "Global copy hotkey listening");
            Some(handle)
        }
        Err(e) => {
            warn!("Global copy hotkey unavailable: {}", e);
            None
        }
    }
}
