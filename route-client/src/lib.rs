//! Low-emission route planner client.
//!
//! Orchestrates a route-planning session against the scoring backend:
//! pick an origin and destination on the map, request scored route
//! candidates, and render them with quality-tier styling.

pub mod activity;
pub mod backend;
pub mod bus;
pub mod cache;
pub mod canvas;
pub mod domain;
pub mod orchestrator;
pub mod view;
