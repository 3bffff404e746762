//! Tooltip demo - create a manual tooltip on a button, show it, and destroy
//! it after a hold time, printing every state change.
//!
//! Usage:
//!   tooltip-demo                                  # defaults: bottom, 2000 ms hold
//!   tooltip-demo --show-delay 300 --hide-delay 0  # override the default delay
//!   tooltip-demo --options options.json           # plugin options from JSON

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use tooltip_manager::{
    Delay, Document, Error, Placement, PluginOptions, Rect, RectPositioner, TooltipConfig,
    TooltipHandle, TooltipManager, TooltipState, Trigger,
};

#[derive(Parser)]
#[command(name = "tooltip-demo")]
#[command(about = "Create, show and destroy a manual tooltip")]
struct Cli {
    /// Plugin options JSON file (defaults to the user config directory)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Tooltip content
    #[arg(long, default_value = "This is a manual tooltip")]
    content: String,

    /// Placement such as top, bottom-start, auto
    #[arg(long, default_value = "bottom")]
    placement: String,

    /// Override the default show delay (ms)
    #[arg(long)]
    show_delay: Option<u64>,

    /// Override the default hide delay (ms)
    #[arg(long)]
    hide_delay: Option<u64>,

    /// Destroy the tooltip after this many ms
    #[arg(long, default_value_t = 2000)]
    hold_ms: u64,

    /// Timer processing interval (ms)
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let path = cli.options.clone().unwrap_or_else(PluginOptions::default_path);
    let options = PluginOptions::load_or_default(&path);
    let placement = Placement::from_str(&cli.placement)
        .ok_or_else(|| Error::InvalidPlacement(cli.placement.clone()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(cli, options, placement))?;

    Ok(())
}

async fn run(cli: Cli, options: PluginOptions, placement: Placement) -> tooltip_manager::Result<()> {
    let mut document = Document::new(1024.0, 768.0);
    let button = document.create_element("button", Rect::new(472.0, 360.0, 80.0, 28.0));
    let manager = TooltipManager::new(document, RectPositioner::new(), options);

    let current = manager.options().default_delay;
    manager.set_default_delay(Delay::new(
        cli.show_delay.unwrap_or(current.show),
        cli.hide_delay.unwrap_or(current.hide),
    ));

    let tooltip = manager.create_tooltip(
        button,
        TooltipConfig::new(cli.content)
            .placement(placement)
            .trigger(Trigger::MANUAL),
    )?;
    tooltip.show()?;

    let start = tokio::time::Instant::now();
    let hold = Duration::from_millis(cli.hold_ms);
    let mut ticker = tokio::time::interval(Duration::from_millis(cli.tick_ms.max(1)));
    let mut last = tooltip.state();
    println!("{:>6} ms  {}", 0, last);
    if last == TooltipState::Visible {
        print_placement(&tooltip)?;
    }

    loop {
        ticker.tick().await;
        manager.process_timers();

        let state = tooltip.state();
        if state != last {
            println!("{:>6} ms  {}", start.elapsed().as_millis(), state);
            if state == TooltipState::Visible {
                print_placement(&tooltip)?;
            }
            last = state;
        }

        if start.elapsed() >= hold {
            manager.destroy_tooltip(button);
            break;
        }
    }

    println!("{:>6} ms  {}", start.elapsed().as_millis(), tooltip.state());
    let tag = manager.host().get(button).map(|el| el.tag.clone()).unwrap_or_default();
    println!(
        "registry: {} tooltip(s), positioning handles: {}, listeners on {}: {}",
        manager.len(),
        manager.positioner().live_handles(),
        tag,
        manager.host().listener_count(button)
    );
    Ok(())
}

fn print_placement(tooltip: &TooltipHandle) -> tooltip_manager::Result<()> {
    if let Some(placed) = tooltip.placement()? {
        println!(
            "           {} at ({:.0}, {:.0}) {}x{}",
            placed.placement.as_str(),
            placed.rect.x,
            placed.rect.y,
            placed.rect.width,
            placed.rect.height
        );
    }
    Ok(())
}
