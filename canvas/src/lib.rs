//! Viewport and gesture engine for the floor-plan viewer.
//!
//! This crate owns everything about a loaded floor plan that has real
//! invariants: normalizing raw layout records into canonical geometry,
//! computing scene bounds, the world/screen camera transform, the
//! multi-pointer gesture state machine, and the search index with its cyclic
//! cursor. The host layer is responsible only for fetching layout documents,
//! forwarding input events, painting the [`render::DrawCommand`]s the engine
//! plans, and showing the [`engine::Action::Notify`] messages it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] tying every component together |
//! | [`layout`] | Layout document schema, sources, and load errors |
//! | [`normalize`] | Raw record → [`doc::SceneObject`] normalization |
//! | [`doc`] | Scene objects and the ordered scene store |
//! | [`geometry`] | Points, AABBs, and rotation helpers |
//! | [`bounds`] | Scene bounds reduction |
//! | [`camera`] | Pan/zoom camera, fit-to-bounds, anchored zoom |
//! | [`input`] | Pointer table and the pan/pinch/wheel gesture state machine |
//! | [`search`] | Search text normalization, index, and match cursor |
//! | [`cull`] | Visible-region queries over the scene |
//! | [`render`] | Screen-space draw plan for the host renderer |
//! | [`color`] | Hex color parsing and alpha application |
//! | [`config`] | Tunable zoom limits and steps |
//! | [`consts`] | Shared numeric constants |

pub mod bounds;
pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod cull;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod normalize;
pub mod render;
pub mod search;
