// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod cookie_jar_store;
        pub(crate) mod key_value_store;
        pub(crate) mod memory_store;
    }
    pub(crate) mod models {
        pub(crate) mod app_config_model;
        pub(crate) mod backup_model;
        pub(crate) mod custom_quote_model;
        pub(crate) mod export_row_model;
        pub(crate) mod goal_model;
        pub(crate) mod iso_date_model;
        pub(crate) mod snapshot_model;
        pub(crate) mod timestamp_model;
        pub(crate) mod transaction_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod snapshot_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod app_config;
        pub(crate) mod app_state;
        pub(crate) mod custom_quote;
        pub(crate) mod dashboard;
        pub(crate) mod entity_id;
        pub(crate) mod export;
        pub(crate) mod goal;
        pub(crate) mod notification;
        pub(crate) mod summary;
        pub(crate) mod time_window;
        pub(crate) mod transaction;
    }
    pub(crate) mod logic {
        pub(crate) mod aggregator;
        pub(crate) mod goal_impl;
        pub(crate) mod keys_impl;
        pub(crate) mod notification_deriver;
        pub(crate) mod quote_rotator;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod snapshot_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod export_usecase;
        pub(crate) mod import_usecase;
        pub(crate) mod persistence_observer;
        pub(crate) mod state_controller;
    }
}

pub(crate) mod presentation {
    pub(crate) mod amount_fmt;
    pub(crate) mod dashboard_printer;
    pub(crate) mod date_fmt;
    pub(crate) mod export_printer;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::app_config::*;
        pub use crate::domain::entities::app_state::*;
        pub use crate::domain::entities::custom_quote::*;
        pub use crate::domain::entities::dashboard::*;
        pub use crate::domain::entities::entity_id::*;
        pub use crate::domain::entities::export::*;
        pub use crate::domain::entities::goal::*;
        pub use crate::domain::entities::notification::*;
        pub use crate::domain::entities::summary::*;
        pub use crate::domain::entities::time_window::*;
        pub use crate::domain::entities::transaction::*;
    }

    pub mod stores {
        pub use crate::data::datasources::cookie_jar_store::CookieJarStore;
        pub use crate::data::datasources::key_value_store::KeyValueStore;
        pub use crate::data::datasources::memory_store::InMemoryStore;
    }

    pub mod observers {
        pub use crate::domain::usecases::state_controller::StateObserver;
    }

    pub mod quotes {
        pub use crate::domain::logic::quote_rotator::{
            savings_tip, week_number, BUILTIN_QUOTES, SAVINGS_TIPS,
        };
    }
}
