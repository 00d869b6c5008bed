//! HTTP JSON API

pub mod api;
