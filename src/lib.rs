//! Isometric tile-map viewer for the browser.
//!
//! This crate is compiled to WebAssembly and owns a `<canvas>` element. It
//! keeps a grid of tiles, each holding an ordered stack of image layers,
//! projects that grid isometrically, turns mouse and touch input into a
//! single pan/hover/click state machine, and redraws the visible tiles on
//! every animation frame. The host page only supplies the map, registers
//! images, and listens for `tileClicked`.
//!
//! Everything except [`host`] and the browser impls in [`render`] and
//! [`assets`] is plain Rust and runs in native unit tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | `#[wasm_bindgen]` entry point, DOM listeners, frame loop |
//! | [`engine`] | Testable [`engine::EngineCore`] reducer and the browser [`engine::Engine`] |
//! | [`iso`] | Tile indices and the isometric projection |
//! | [`viewport`] | Pan offset, hover/selection and press state |
//! | [`input`] | Pointer types and the press/release state machine |
//! | [`map`] | Tile stacks and the map grid |
//! | [`assets`] | Named visuals and their readiness |
//! | [`render`] | Per-frame culling and layer-ordered drawing |
//! | [`events`] | `tileClicked` listener registry |
//! | [`config`] | Viewer configuration |
//! | [`error`] | Error types |
//! | [`logging`] | Console logger setup |
//! | [`consts`] | Shared numeric and naming constants |

pub mod assets;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod input;
pub mod iso;
pub mod logging;
pub mod map;
pub mod render;
pub mod viewport;
