use globalcursor_core::platform::CursorSourceImpl;
use globalcursor_core::{CursorPositionProvider, Position};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

pub struct WatchOptions {
    pub interval: Duration,
    pub count: Option<u64>,
    pub changes_only: bool,
}

/// Drives `provider` like a host update loop: one refresh per tick until `shutdown` is set or
/// `count` ticks have run, then releases the provider's native resources. Every position that
/// should be shown is passed to `report`. Returns the number of ticks run.
pub fn watch<S, F>(
    provider: &mut CursorPositionProvider<S>,
    options: &WatchOptions,
    shutdown: &AtomicBool,
    mut report: F,
) -> u64
where
    S: CursorSourceImpl,
    F: FnMut(Position),
{
    let mut ticks = 0;
    let mut last_reported = None;

    while !shutdown.load(Ordering::SeqCst) && options.count.map_or(true, |count| ticks < count) {
        provider.refresh();
        ticks += 1;

        let position = provider.current_position();
        if !options.changes_only || last_reported != Some(position) {
            report(position);
            last_reported = Some(position);
        }

        if options.count != Some(ticks) {
            thread::sleep(options.interval);
        }
    }

    provider.shutdown();
    info!("Stopped after {ticks} refreshes");
    ticks
}
