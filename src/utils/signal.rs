//! Signal handling for graceful shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set up a Ctrl-C handler that clears the returned flag.
///
/// The ingestion loop and its sleeps poll the flag, so the process winds down
/// within one poll interval.
///
/// # Example
/// ```ignore
/// let running = setup_ctrl_c_handler()?;
/// ingestion.run(&mut session, &publisher, &running);
/// ```
pub fn setup_ctrl_c_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;
    Ok(running)
}
