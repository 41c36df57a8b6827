// Library crate: exposes testable modules for integration tests and the JSON command interface.
// GUI-specific modules (app, ui, viewport painting) remain in the binary crate.

pub mod command;
pub mod fixtures;
pub mod harness;
pub mod snap;
pub mod state;
pub mod validation;

/// Camera math and picking; the painting side of the viewport stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod picking;
}
