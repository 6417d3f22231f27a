//! Linkdock demo binary
//!
//! Drives the integration-input feature headlessly on a stage: opens the
//! menu, picks an integration, enters a couple of links and prints what
//! the list ends up holding.

mod integration_input;
mod integration_list;
mod integration_menu;
mod link_input;
mod update_menu;

use linkdock_host::Stage;
use linkdock_ui::dropdown::DEFAULT_ARM_DELAY;
use linkdock_ui::text_field::Key;
use log::info;

use crate::integration_input::IntegrationInput;

fn type_value(stage: &Stage, input: &mut IntegrationInput, value: &str) {
    for c in value.chars() {
        input.type_key(stage, Key::Char(c));
    }
}

fn add_link(stage: &Stage, input: &mut IntegrationInput, id: u32, link: &str) {
    input.press_add(stage);
    input.select_integration(stage, id);
    stage.advance(DEFAULT_ARM_DELAY);
    type_value(stage, input, link);
    input.type_key(stage, Key::Enter);
    input.update(stage);
}

fn main() {
    env_logger::init();

    let stage = Stage::new();
    let mut input = IntegrationInput::new(&stage);
    info!("integration input mounted");

    add_link(&stage, &mut input, 3, "https://linear.app/team/DSN-556");
    add_link(&stage, &mut input, 2, "https://invalid.com/file/abc");

    println!("before resolving:");
    for item in input.list().items() {
        let tag = if item.shows_progress_tag() {
            " [In Progress]"
        } else {
            ""
        };
        println!("  {} -> {}{}", item.record().integration.title, item.display_text(), tag);
    }

    input.resolve_pending(&stage);

    println!("after resolving:");
    for item in input.list().items() {
        println!("  {} -> {}", item.record().integration.title, item.display_text());
    }

    // Dropdowns left open would still be listening; everything is closed
    // by now so the stage should be quiet
    input.update(&stage);
    println!("active pointer listeners: {}", stage.active_listener_count());
}
