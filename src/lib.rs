// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Distance-tiered instance partitioning and picking for million-element
//! point scenes.
//!
//! lodviz scatters a large population of spheres uniformly through a ball,
//! splits it once by distance from the origin into near, mid, and far
//! tiers, and keeps each tier in the representation that is cheapest to
//! draw at that distance: detailed instanced meshes up close, coarser
//! meshes in the middle band, and camera-facing impostor sprites beyond.
//! A ray picker resolves pointer clicks across every tier and highlights
//! a single element, restoring its color exactly when the selection moves
//! or clears.
//!
//! # Key entry points
//!
//! - [`scene::TieredScene`] - owns the stores, picker, camera, and frame
//!   loop
//! - [`population::partition_population`] - the one-pass generate and
//!   classify step
//! - [`picking::PickResolver`] - the highlight state machine
//! - [`renderer::FrameRenderer`] - the rendering collaborator seam
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything is single-threaded and frame-driven. Partitioning runs once
//! before the first frame. After that only the picker writes to the
//! stores (colors only), and [`scene::TieredScene::frame`] hands the
//! renderer a borrowed [`renderer::FrameSnapshot`] carrying the dirty
//! color ranges to upload.

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod population;
pub mod renderer;
pub mod scene;
pub mod store;
pub mod util;

pub use error::{LodError, Result};
pub use options::{Options, SceneConfig};
pub use picking::{PickOutcome, PickResolver, Selection};
pub use population::{partition_population, Tier};
pub use scene::TieredScene;
