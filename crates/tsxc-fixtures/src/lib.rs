//! Fixture components for end-to-end tests.
//!
//! `build.rs` compiles the units in `units/` (and the ones it builds in code)
//! with the tsxc pipeline into `OUT_DIR`; the modules are included here under
//! the namespace configured in `tsxc.json`.

pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/gate.rs"));
    include!(concat!(env!("OUT_DIR"), "/card.rs"));
    include!(concat!(env!("OUT_DIR"), "/badge.rs"));
    include!(concat!(env!("OUT_DIR"), "/page.rs"));
    include!(concat!(env!("OUT_DIR"), "/example.rs"));
}
