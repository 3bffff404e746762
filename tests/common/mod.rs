//! Shared test helpers.

use tooltip_manager::{
    AnchorId, Delay, Document, ManualClock, PluginOptions, Rect, RectPositioner, TooltipConfig,
    TooltipManager, Trigger,
};

/// Options the documentation site installs: 5 s dispose timeout, 12 px
/// overflow padding, 300 ms show delay and immediate hide.
#[allow(dead_code)]
pub fn docs_options() -> PluginOptions {
    let mut options = PluginOptions::from_json(
        r#"{
            "disposeTimeout": 5000,
            "popover": {
                "defaultPopperOptions": {
                    "modifiers": { "preventOverflow": { "padding": 12 } }
                }
            }
        }"#,
    )
    .expect("docs options parse");
    options.default_delay = Delay::new(300, 0);
    options
}

pub struct Fixture {
    pub manager: TooltipManager,
    pub clock: ManualClock,
    pub button: AnchorId,
}

#[allow(dead_code)]
impl Fixture {
    /// Advance the clock and fire due timers.
    pub fn advance(&self, ms: u64) -> usize {
        self.clock.advance_ms(ms);
        self.manager.process_timers()
    }

    pub fn listeners(&self) -> usize {
        self.manager.host().listener_count(self.button)
    }

    pub fn live_poppers(&self) -> usize {
        self.manager.positioner().live_handles()
    }
}

/// A 1024x768 document with one button and a manager on a manual clock.
#[allow(dead_code)]
pub fn fixture_with(options: PluginOptions) -> Fixture {
    let mut document = Document::new(1024.0, 768.0);
    let button = document.create_element("button", Rect::new(100.0, 100.0, 80.0, 24.0));
    let clock = ManualClock::new();
    let manager = TooltipManager::with_clock(document, RectPositioner::new(), options, clock.clone());
    Fixture { manager, clock, button }
}

#[allow(dead_code)]
pub fn fixture() -> Fixture {
    fixture_with(docs_options())
}

#[allow(dead_code)]
pub fn manual(content: &str) -> TooltipConfig {
    TooltipConfig::new(content).trigger(Trigger::MANUAL)
}
