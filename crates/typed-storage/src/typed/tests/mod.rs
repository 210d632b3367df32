mod registry_tests;

use crate::converter::{enumeration, Boolean, Enumeration, Integer, IsoDate, Text};

crate::typed_schema! {
    /// Schema shared by the typed tests
    pub struct Settings {
        pub count: Integer = Integer,
        pub flag: Boolean = Boolean,
        pub name: Text = Text,
        pub mode: Enumeration = enumeration(["fast", "slow"]),
        pub seen_at: IsoDate = IsoDate,
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
