//! Walkthrough - Drive the navigation layer on a headless landing page.
//!
//! Installs a trace-level subscriber, so every router and tracker decision
//! is printed as it happens.

use std::time::Duration;

use spark_nav::{mount, AppConfig, HeadlessPage, Location, Route, Viewport};

fn route(name: &str) -> Route {
    match Route::new(name) {
        Ok(route) => route,
        Err(err) => panic!("bad demo route {name:?}: {err}"),
    }
}

fn report(page: &HeadlessPage, step: &str) {
    println!(
        "{step:<28} fragment={:<10} scroll_y={:<6} active={:?}",
        page.fragment(),
        page.scroll_y(),
        page.active_links()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .init();

    let config = AppConfig::from_toml_str(
        r#"
        [navigation]
        default_route = "download"
        offset_top = 80.0
        activation_lookahead = 150.0
        top_threshold = 100.0
        settle_delay_ms = 100
        "#,
    )?;

    let page = HeadlessPage::new()
        .with_section(route("download"), 0.0, 900.0)
        .with_section(route("about"), 900.0, 1100.0)
        .with_section(route("contact"), 2000.0, 800.0)
        .with_link("nav-download", route("download"))
        .with_link("nav-about", route("about"))
        .with_link("nav-contact", route("contact"))
        .with_element("back-to-top")
        .with_viewport_height(720.0)
        .into_rc();

    let handle = mount(page.clone(), &config, |router| {
        router
            .add_route(route("download"), || println!("  -> show store badges"))
            .add_route(route("about"), || println!("  -> start feature carousel"))
            .add_route(route("contact"), || println!("  -> focus contact form"));
    });

    page.load();
    page.pump(&handle);
    page.advance(Duration::from_millis(100));
    report(&page, "loaded");

    page.click_link(route("about"));
    page.pump(&handle);
    report(&page, "clicked about");

    for y in [1400.0, 1900.0, 2050.0] {
        page.user_scroll_to(y);
        page.pump(&handle);
        report(&page, &format!("scrolled to {y}"));
    }

    page.click("back-to-top");
    page.pump(&handle);
    report(&page, "back to top");

    page.back();
    page.pump(&handle);
    report(&page, "history back");

    println!(
        "silent fragment rewrites: {}, history: {:?}",
        handle.tracker().silent_update_count(),
        page.history()
    );

    handle.unmount();
    Ok(())
}
