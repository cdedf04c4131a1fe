//! Phone Call State Machine
//!
//! This example demonstrates nested states and lifecycle actions.
//!
//! Key concepts:
//! - OnHold is a substate of Connected and inherits its HungUp transition
//! - The call timer runs from entering Connected until leaving it for good
//! - Guards deciding between destinations at fire time
//! - DOT output and configuration validation
//!
//! Run with: RUST_LOG=debug cargo run --example phone_call

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use superstate::StateMachine;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Call {
    OffHook,
    Ringing,
    Connected,
    OnHold,
    Voicemail,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Event {
    CallDialed,
    CallConnected,
    NoAnswer,
    PlacedOnHold,
    TakenOffHold,
    HungUp,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Phone Call State Machine ===\n");

    let voicemail_enabled = Arc::new(AtomicBool::new(true));
    let mut phone: StateMachine<Call, Event> = StateMachine::new(Call::OffHook);

    phone
        .configure(Call::OffHook)
        .permit(Event::CallDialed, Call::Ringing)?;

    let to_voicemail = Arc::clone(&voicemail_enabled);
    let to_off_hook = Arc::clone(&voicemail_enabled);
    phone
        .configure(Call::Ringing)
        .permit(Event::CallConnected, Call::Connected)?
        .permit_if(Event::NoAnswer, Call::Voicemail, move || {
            to_voicemail.load(Ordering::SeqCst)
        })?
        .permit_if(Event::NoAnswer, Call::OffHook, move || {
            !to_off_hook.load(Ordering::SeqCst)
        })?;

    phone
        .configure(Call::Connected)
        .permit(Event::HungUp, Call::OffHook)?
        .permit(Event::PlacedOnHold, Call::OnHold)?
        .on_entry(|| println!("  [timer] started"))
        .on_exit(|| println!("  [timer] stopped"));

    phone
        .configure(Call::OnHold)
        .substate_of(Call::Connected)
        .permit(Event::TakenOffHold, Call::Connected)?
        .on_entry(|| println!("  [music] playing"))
        .on_exit(|| println!("  [music] stopped"));

    phone
        .configure(Call::Voicemail)
        .permit(Event::HungUp, Call::OffHook)?;

    println!("{phone}\n");

    for event in [
        Event::CallDialed,
        Event::CallConnected,
        Event::PlacedOnHold,
        Event::TakenOffHold,
        Event::PlacedOnHold,
        Event::HungUp,
        Event::CallDialed,
        Event::NoAnswer,
        Event::HungUp,
    ] {
        println!("{event:?}");
        if !phone.fire(event)? {
            println!("  (ignored)");
        }
        println!("  now {:?}", phone.current_state());
    }

    println!("\nVisited: {:?}", phone.history().get_path());

    println!("\nTransition graph:");
    let mut dot = Vec::new();
    phone.write_dot(&mut dot)?;
    println!("{}", String::from_utf8_lossy(&dot));

    println!("Configuration valid: {}", phone.validate().is_success());

    println!("\n=== Example Complete ===");
    Ok(())
}
