//! Map Overlay Example - a matchroom page driven by a metrics signal
//!
//! This example plays the page-integration driver:
//! - Builds a fake matchroom page with one card per map
//! - Creates a "map" feature with a sidebar, a summary and a tint action per card
//! - Subscribes the feature to a metrics signal and updates it
//! - Simulates the page re-rendering a card and re-anchors the components
//!
//! Run with: RUST_LOG=debug cargo run --example map_overlay

use std::rc::Rc;

use spark_signals::signal;
use tracing_subscriber::EnvFilter;

use matchroom_overlay::{
    view, ComponentOptions, Feature, HostDocument, MarkupRoots, MemoryDocument, Node, Page,
};

const MAPS: [&str; 3] = ["de_mirage", "de_inferno", "de_nuke"];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== matchroom-overlay Map Example ===\n");

    // Fake host page
    let doc = Rc::new(MemoryDocument::new());
    let matchroom = doc.append_element(doc.root(), "div");
    doc.set_attribute(matchroom, "id", "matchroom");
    let cards: Vec<_> = MAPS
        .iter()
        .map(|map| {
            let card = doc.append_element(matchroom, "div");
            doc.set_attribute(card, "data-map", map);
            card
        })
        .collect();

    // Relative win rate per map (team 1 - team 2)
    let metrics = signal(vec![0.0_f64; MAPS.len()]);

    let page: Page<Node> = Page::new(doc.clone(), MarkupRoots::new(doc.clone()));
    let feature = Feature::build("map", page, |feature| {
        feature.set_container(Some(matchroom));

        for (index, &card) in cards.iter().enumerate() {
            let sidebar = metrics.clone();
            feature
                .add_component_with(
                    view(move |_| Ok(bar(sidebar.get()[index]))),
                    ComponentOptions::named("sidebar"),
                )
                .prepend_to(Some(card))?;

            let summary = metrics.clone();
            feature
                .add_component_with(
                    view(move |scope| {
                        Ok(format!(
                            "{:+.0}% [{}]",
                            summary.get()[index] * 100.0,
                            scope.identifier("relative-win-rate")
                        ))
                    }),
                    ComponentOptions::named("summary"),
                )
                .append_to(Some(card))?;

            let render_doc = doc.clone();
            let unmount_doc = doc.clone();
            feature.add_action(
                move || {
                    render_doc.set_style(card, "background-color", "hsl(113, 15%, 15%)");
                    Ok(())
                },
                move || {
                    unmount_doc.set_style(card, "background-color", "");
                    Ok(())
                },
            );
        }
        Ok(())
    })?;

    let subscription = feature.add_listener(&metrics);
    feature.render()?;
    print_cards(&doc, &cards, "Initial render");

    metrics.set(vec![0.04, -0.03, 0.01]);
    print_cards(&doc, &cards, "After metrics update");

    // The page throws away the second card and renders a fresh one
    doc.detach(cards[1]);
    let fresh = doc.append_element(matchroom, "div");
    for component in feature.components() {
        if !component.is_rendered() {
            println!("  re-anchoring {} ({})", component.name(), component.id());
            component.append_to(Some(fresh))?;
        }
    }
    println!();

    subscription.unsubscribe();
    feature.remove()?;
    print_cards(&doc, &cards, "After remove");

    Ok(())
}

fn bar(relative: f64) -> String {
    let width = (relative.abs() * 100.0).round() as usize;
    let glyph = if relative >= 0.0 { '+' } else { '-' };
    std::iter::repeat_n(glyph, width.max(1)).collect()
}

fn print_cards(doc: &MemoryDocument, cards: &[matchroom_overlay::ElementId], title: &str) {
    println!("{title}:");
    for (map, &card) in MAPS.iter().zip(cards) {
        let fragments: Vec<String> = doc
            .children(card)
            .into_iter()
            .filter_map(|child| doc.text(child))
            .collect();
        let tint = doc.style(card, "background-color").unwrap_or_default();
        println!("  {map:<11} {fragments:?} {tint}");
    }
    println!();
}
