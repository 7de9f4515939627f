//! Robo-Coach - Conversational Robotics Coaching Core
//!
//! This crate implements the coaching conversation engine behind the
//! Robo-Coach chat applications: a vagueness classifier that picks a prompt
//! mode for each user message, a prompt formatter, an append-only
//! conversation log, and a session orchestrator that drives the external
//! chat-completion and text-to-speech collaborators.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
