/*
 * Flocking Generations
 *
 * A 3D flock of immortal anchors. Hold the mouse button (or touch) to pull
 * the flock towards the pointer; while held, each anchor periodically spawns
 * a generation of short-lived offspring that fade from red to blue as they age.
 *
 * Set RUST_LOG (e.g. `RUST_LOG=flocklife=debug`) to see spawn and expiry logs.
 */

use flocklife::app;

fn main() {
    init_tracing();
    nannou::app(app::model).update(app::update).run();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
