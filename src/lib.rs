pub mod shared {
    pub mod infrastructure {
        pub mod bigquery;
    }
}

pub mod modules {
    pub mod access {
        pub mod password_gate;
        pub mod inbound {
            pub mod http;
        }
    }

    pub mod quotations {
        pub mod core {
            pub mod filter;
            pub mod quotation;
            pub mod snapshot;
            pub mod unique_key;
        }
        pub mod use_cases {
            pub mod list_quotations {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod queries_port;
            }
            pub mod save_notes {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod persister_port;
                pub mod reconcile;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod warehouse_bigquery;
                pub mod warehouse_in_memory;
            }
        }
    }
}

pub mod shell;
