use std::sync::Arc;

use crate::converter::{Boolean, Integer, Text};
use crate::storage::memory::MemoryStorage;

crate::typed_schema! {
    pub struct Counter {
        pub count: Integer = Integer,
    }
}

crate::typed_schema! {
    pub struct Letter {
        pub a: Text = Text,
    }
}

crate::typed_schema! {
    pub struct Toggle {
        pub x: Boolean = Boolean,
    }
}

crate::typed_schema! {
    pub struct Flags {
        pub flag: Boolean = Boolean,
    }
}

/// Fresh empty store with logging enabled
pub fn setup_store() -> Arc<MemoryStorage> {
    let _ = env_logger::builder().is_test(true).try_init();
    Arc::new(MemoryStorage::named("scenario"))
}
