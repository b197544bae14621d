/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: gate: Arc<Gatekeeper>
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::gate::Gatekeeper;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<Gatekeeper>,
}

impl AppState {
    pub fn new(gate: Arc<Gatekeeper>) -> Self {
        Self { gate }
    }
}
