/*
 * Responsibility
 * - crate の公開面 (bin と tests/ が同じ Router を使えるように lib 化)
 */
pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod portal;
pub mod services;
pub mod state;
