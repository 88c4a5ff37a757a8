use crate::modules::access::password_gate::PasswordGate;
use crate::modules::quotations::use_cases::list_quotations::handler::ListQuotationsHandler;
use crate::modules::quotations::use_cases::list_quotations::queries_port::QuotationSource;
use crate::modules::quotations::use_cases::save_notes::handler::SaveNotesHandler;
use crate::modules::quotations::use_cases::save_notes::persister_port::NotePersister;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<PasswordGate>,
    pub list_quotations: Arc<ListQuotationsHandler<dyn QuotationSource>>,
    pub save_notes: Arc<SaveNotesHandler<dyn NotePersister>>,
}

impl AppState {
    /// Wires both use cases to one warehouse implementation.
    pub fn new<TWarehouse>(gate: PasswordGate, warehouse: Arc<TWarehouse>) -> Self
    where
        TWarehouse: QuotationSource + NotePersister + 'static,
    {
        let source: Arc<dyn QuotationSource> = warehouse.clone();
        let persister: Arc<dyn NotePersister> = warehouse;
        Self {
            gate: Arc::new(gate),
            list_quotations: Arc::new(ListQuotationsHandler::new(source)),
            save_notes: Arc::new(SaveNotesHandler::new(persister)),
        }
    }
}
