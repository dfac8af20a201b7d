//! Headless Session
//!
//! This example drives a full session without a terminal.
//!
//! Key concepts:
//! - The session owns the calculator, a screen and a key-value store
//! - A recording screen captures every update for inspection
//! - History, memory and theme are written to the store as JSON
//! - A second session restores them from the same store
//!
//! Run with: cargo run --example headless_session

use abacus::keymap::parse_line;
use abacus::persistence::{KeyValueStore, MemoryStore, HISTORY_KEY, MEMORY_KEY, SETTINGS_KEY};
use abacus::session::{RecordingScreen, ScreenEvent, Session};

fn main() {
    println!("=== Headless Session Example ===\n");

    let store = MemoryStore::new();
    let screen = RecordingScreen::new();
    let mut session = Session::open(store.clone(), screen.clone());

    let parsed = parse_line("52*3= storage-save 16 square theme");
    session.dispatch_all(&parsed.commands);

    let snapshot = session.snapshot();
    println!("Display:    {}", snapshot.value);
    println!("Expression: {}", snapshot.expression);
    println!("Memory:     {:?}", snapshot.memory);
    println!("Theme:      {:?}", snapshot.theme);

    let flushes = screen
        .events()
        .iter()
        .filter(|event| **event == ScreenEvent::Flush)
        .count();
    println!("Screen events: {} ({} flushes)", screen.events().len(), flushes);

    println!("\nStored records:");
    for key in [HISTORY_KEY, SETTINGS_KEY, MEMORY_KEY] {
        match store.get(key) {
            Ok(Some(json)) => println!("  {key}: {json}"),
            Ok(None) => println!("  {key}: (missing)"),
            Err(e) => println!("  {key}: {e}"),
        }
    }

    // A new session over the same store picks everything back up
    let restored = Session::open(store, RecordingScreen::new());
    let snapshot = restored.snapshot();
    println!("\nRestored session:");
    println!("  history entries: {}", snapshot.history_len);
    println!("  memory:          {:?}", snapshot.memory);
    println!("  theme:           {:?}", snapshot.theme);

    println!("\n=== Example Complete ===");
}
