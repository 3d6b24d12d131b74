// Library crate: exposes the headless editor core for integration tests
// and scripted use. GUI-specific modules (app, ui, GL rendering) remain
// in the binary crate.

pub mod geometry;
pub mod harness;
pub mod state;

/// Subset of viewport types with no GL dependency (MeshData, Ray, picking).
/// The full viewport (camera, renderer, GL) stays in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
