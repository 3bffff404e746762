//! Create/show/hide/destroy lifecycle of imperative tooltips.

mod common;

use common::{docs_options, fixture, fixture_with, manual};
use tooltip_manager::{
    Delay, Error, Placement, PluginOptions, Rect, TooltipConfig, TooltipState, Trigger,
};

#[test]
fn test_manual_tooltip_shows_after_delay_and_destroy_releases_everything() {
    let fx = fixture();
    let tooltip = fx
        .manager
        .create_tooltip(fx.button, manual("x").placement(Placement::BOTTOM))
        .unwrap();
    assert_eq!(tooltip.state(), TooltipState::Hidden);
    assert_eq!(fx.listeners(), 0, "manual trigger attaches no listeners");

    tooltip.show().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Showing);
    fx.advance(300);
    assert_eq!(tooltip.state(), TooltipState::Visible);
    assert!(tooltip.placement().unwrap().is_some());
    assert_eq!(fx.live_poppers(), 1);

    fx.manager.destroy_tooltip(fx.button);
    assert!(!fx.manager.contains(fx.button));
    assert_eq!(fx.live_poppers(), 0);
    assert_eq!(fx.manager.pending_timers(), 0);
    assert_eq!(tooltip.state(), TooltipState::Destroyed);
}

#[test]
fn test_hide_is_immediate_while_show_waits_for_delay() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    fx.advance(299);
    assert_eq!(tooltip.state(), TooltipState::Showing);
    fx.advance(1);
    assert_eq!(tooltip.state(), TooltipState::Visible);

    tooltip.hide().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Hidden);
}

#[test]
fn test_hide_before_show_delay_never_becomes_visible() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    fx.advance(100);
    tooltip.hide().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Hidden);

    for _ in 0..10 {
        fx.advance(100);
        assert_ne!(tooltip.state(), TooltipState::Visible);
    }
    assert_eq!(fx.live_poppers(), 0, "positioning never ran");
}

#[test]
fn test_show_cancels_pending_hide() {
    let mut options = docs_options();
    options.default_delay = Delay::new(0, 200);
    let fx = fixture_with(options);
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Visible);
    tooltip.hide().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Hiding);

    tooltip.show().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Visible);
    fx.advance(500);
    assert_eq!(tooltip.state(), TooltipState::Visible);
}

#[test]
fn test_repeated_show_does_not_restart_delay() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    fx.advance(200);
    tooltip.show().unwrap();
    fx.advance(100);
    assert_eq!(tooltip.state(), TooltipState::Visible);
}

#[test]
fn test_destroy_is_idempotent() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    fx.manager.destroy_tooltip(fx.button);
    fx.manager.destroy_tooltip(fx.button);
    tooltip.destroy();
    assert!(fx.manager.is_empty());

    // Never registered at all.
    let other = fx
        .manager
        .host_mut()
        .create_element("span", Rect::new(0.0, 0.0, 10.0, 10.0));
    fx.manager.destroy_tooltip(other);
    assert!(fx.manager.is_empty());
}

#[test]
fn test_operations_after_destroy_fail() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    let id = tooltip.id();
    tooltip.destroy();

    assert!(matches!(tooltip.show(), Err(Error::DestroyedInstance(d)) if d == id));
    assert!(matches!(tooltip.hide(), Err(Error::DestroyedInstance(_))));
    assert!(matches!(tooltip.set_content("y"), Err(Error::DestroyedInstance(_))));
    assert!(matches!(tooltip.placement(), Err(Error::DestroyedInstance(_))));
    assert!(tooltip.is_destroyed());
}

#[test]
fn test_create_rejects_unmounted_anchor() {
    let fx = fixture();
    fx.manager.host_mut().unmount(fx.button);

    let result = fx.manager.create_tooltip(fx.button, manual("x"));
    assert!(matches!(result, Err(Error::InvalidAnchor(a)) if a == fx.button));
    assert!(fx.manager.is_empty());

    fx.manager.host_mut().remove(fx.button);
    assert!(fx.manager.create_tooltip(fx.button, manual("x")).is_err());
}

#[test]
fn test_create_replaces_prior_instance_without_leaking() {
    let fx = fixture();
    let hover = TooltipConfig::new("first").trigger(Trigger::HOVER);
    let first = fx.manager.create_tooltip(fx.button, hover.clone()).unwrap();
    let baseline = fx.listeners();
    assert_eq!(baseline, 3, "mouseenter, mouseleave and hide-on-click");

    first.show().unwrap();
    fx.advance(300);
    assert_eq!(fx.live_poppers(), 1);

    let second = fx.manager.create_tooltip(fx.button, hover).unwrap();
    assert_eq!(fx.listeners(), baseline);
    assert_eq!(fx.live_poppers(), 0);
    assert_eq!(fx.manager.len(), 1);

    assert_ne!(first.id(), second.id());
    assert_eq!(first.state(), TooltipState::Destroyed);
    assert!(first.show().is_err());
    assert_eq!(second.state(), TooltipState::Hidden);

    // The stale handle must not tear down its replacement.
    first.destroy();
    assert!(fx.manager.contains(fx.button));
}

#[test]
fn test_hidden_tooltip_is_disposed_after_timeout() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    fx.advance(300);
    tooltip.hide().unwrap();

    fx.advance(4999);
    assert!(fx.manager.contains(fx.button));
    fx.advance(1);
    assert!(!fx.manager.contains(fx.button));
    assert!(tooltip.is_destroyed());
    assert_eq!(fx.live_poppers(), 0);
}

#[test]
fn test_show_before_timeout_keeps_tooltip_alive() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    fx.advance(300);
    tooltip.hide().unwrap();
    fx.advance(4000);
    tooltip.show().unwrap();
    fx.advance(300);
    fx.advance(10_000);

    assert!(fx.manager.contains(fx.button));
    assert_eq!(tooltip.state(), TooltipState::Visible);
}

#[test]
fn test_never_shown_tooltip_is_not_disposed() {
    let fx = fixture();
    fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    fx.advance(60_000);
    assert!(fx.manager.contains(fx.button));
}

#[test]
fn test_delayed_hide_then_dispose_in_one_pass() {
    let mut options = docs_options();
    options.default_delay = Delay::new(0, 100);
    let fx = fixture_with(options);
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    tooltip.hide().unwrap();
    // Hide commits at 100 ms, dispose is due at 5100 ms.
    let fired = fx.advance(6000);
    assert_eq!(fired, 2);
    assert!(fx.manager.is_empty());
}

#[test]
fn test_disabled_dispose_timeout() {
    let mut options = docs_options();
    options.dispose_timeout = None;
    let fx = fixture_with(options);
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    tooltip.show().unwrap();
    fx.advance(300);
    tooltip.hide().unwrap();
    fx.advance(60_000);
    assert_eq!(tooltip.state(), TooltipState::Hidden);
}

#[test]
fn test_dispose_tolerates_detached_anchor() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, TooltipConfig::new("x")).unwrap();
    tooltip.show().unwrap();
    fx.advance(300);
    tooltip.hide().unwrap();

    fx.manager.host_mut().remove(fx.button);
    fx.advance(5000);
    assert!(fx.manager.is_empty());
    assert_eq!(fx.live_poppers(), 0);
}

#[test]
fn test_show_with_detached_anchor_skips_positioning() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    fx.manager.host_mut().unmount(fx.button);

    tooltip.show().unwrap();
    fx.advance(300);
    assert_eq!(tooltip.state(), TooltipState::Visible);
    assert_eq!(tooltip.placement().unwrap(), None);
}

#[test]
fn test_set_content_repositions_visible_tooltip() {
    let fx = fixture();
    let tooltip = fx
        .manager
        .create_tooltip(fx.button, manual("short").placement(Placement::BOTTOM))
        .unwrap();
    tooltip.show().unwrap();
    fx.advance(300);
    let before = tooltip.placement().unwrap().unwrap().rect.width;

    tooltip.set_content("a considerably longer line of content").unwrap();
    let after = tooltip.placement().unwrap().unwrap().rect.width;
    assert!(after > before);
    assert_eq!(tooltip.config().unwrap().content, "a considerably longer line of content");
}

#[test]
fn test_default_delay_change_applies_to_new_tooltips() {
    let fx = fixture();
    let old = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    assert_eq!(old.config().unwrap().delay, Delay::new(300, 0));

    fx.manager.set_default_delay(Delay::new(50, 50));
    assert_eq!(old.config().unwrap().delay, Delay::new(300, 0));

    let new = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    assert_eq!(new.config().unwrap().delay, Delay::new(50, 50));
    assert_eq!(fx.manager.options().default_delay, Delay::new(50, 50));
}

#[test]
fn test_dispose_timeout_change_applies_to_new_tooltips() {
    let fx = fixture();
    let old = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    fx.manager.set_dispose_timeout(Some(100));
    assert_eq!(fx.manager.options().dispose_timeout, Some(100));

    old.show().unwrap();
    fx.advance(300);
    old.hide().unwrap();
    fx.advance(1000);
    assert!(fx.manager.contains(fx.button));
    assert!(!old.is_destroyed());

    let other = fx
        .manager
        .host_mut()
        .create_element("button", Rect::new(300.0, 300.0, 80.0, 24.0));
    let new = fx.manager.create_tooltip(other, manual("y")).unwrap();
    new.show().unwrap();
    fx.advance(300);
    new.hide().unwrap();
    fx.advance(99);
    assert!(fx.manager.contains(other));
    fx.advance(1);
    assert!(!fx.manager.contains(other));
    assert!(new.is_destroyed());
    assert!(fx.manager.contains(fx.button));
}

#[test]
fn test_per_tooltip_delay_overrides_default() {
    let fx = fixture();
    let tooltip = fx
        .manager
        .create_tooltip(fx.button, manual("x").delay(Delay::new(0, 0)))
        .unwrap();
    tooltip.show().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Visible);
}

#[test]
fn test_destroy_all_and_drop_release_resources() {
    let fx = fixture();
    let second = fx
        .manager
        .host_mut()
        .create_element("button", Rect::new(300.0, 300.0, 80.0, 24.0));
    let a = fx.manager.create_tooltip(fx.button, TooltipConfig::new("a")).unwrap();
    let b = fx.manager.create_tooltip(second, TooltipConfig::new("b")).unwrap();
    assert_eq!(fx.manager.len(), 2);

    assert_eq!(fx.manager.destroy_all(), 2);
    assert!(a.is_destroyed() && b.is_destroyed());
    assert_eq!(fx.manager.host().total_listeners(), 0);

    let c = fx.manager.create_tooltip(second, manual("c")).unwrap();
    drop(fx);
    assert!(matches!(c.show(), Err(Error::DestroyedInstance(_))));
    assert_eq!(c.state(), TooltipState::Destroyed);
}

#[test]
fn test_get_returns_current_instance() {
    let fx = fixture();
    assert!(fx.manager.get(fx.button).is_none());
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    let found = fx.manager.get(fx.button).unwrap();
    assert_eq!(found.id(), tooltip.id());

    found.show().unwrap();
    assert_eq!(tooltip.state(), TooltipState::Showing);
}

#[test]
fn test_next_timer_in_reports_remaining_delay() {
    let fx = fixture();
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();
    assert_eq!(fx.manager.next_timer_in(), None);

    tooltip.show().unwrap();
    fx.advance(120);
    assert_eq!(fx.manager.next_timer_in(), Some(std::time::Duration::from_millis(180)));
}

#[test]
fn test_state_trace() {
    let mut options = PluginOptions::default();
    options.default_delay = Delay::new(300, 100);
    options.dispose_timeout = Some(1000);
    let fx = fixture_with(options);
    let tooltip = fx.manager.create_tooltip(fx.button, manual("x")).unwrap();

    let mut trace = vec![tooltip.state().to_string()];
    tooltip.show().unwrap();
    trace.push(tooltip.state().to_string());
    fx.advance(300);
    trace.push(tooltip.state().to_string());
    tooltip.hide().unwrap();
    trace.push(tooltip.state().to_string());
    fx.advance(100);
    trace.push(tooltip.state().to_string());
    fx.advance(1000);
    trace.push(tooltip.state().to_string());

    insta::assert_snapshot!(trace.join(" -> "), @"hidden -> showing -> visible -> hiding -> hidden -> destroyed");
}
