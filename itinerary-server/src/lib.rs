//! Heritage itinerary planner server.
//!
//! A web application that answers: "I have an afternoon near Algiers,
//! which heritage sites should I visit and in what order?"

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod web;
