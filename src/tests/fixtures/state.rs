// Application state wired to an in memory warehouse, for inbound adapter tests.

use crate::modules::access::inbound::http::PASSWORD_HEADER;
use crate::modules::access::password_gate::PasswordGate;
use crate::modules::quotations::adapters::outbound::warehouse_in_memory::InMemoryWarehouse;
use crate::shell::state::AppState;
use std::sync::Arc;

pub const TEST_PASSWORD: &str = "titok123";

pub fn make_test_state(warehouse: InMemoryWarehouse) -> (AppState, Arc<InMemoryWarehouse>) {
    let warehouse = Arc::new(warehouse);
    let state = AppState::new(PasswordGate::new(TEST_PASSWORD), warehouse.clone());
    (state, warehouse)
}

pub fn offline_warehouse() -> InMemoryWarehouse {
    let mut warehouse = InMemoryWarehouse::new();
    warehouse.toggle_offline();
    warehouse
}

pub fn password_header() -> (&'static str, &'static str) {
    (PASSWORD_HEADER, TEST_PASSWORD)
}
