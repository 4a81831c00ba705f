//! Command implementations for plug-cli

pub mod audit;
pub mod events;
pub mod marketplace;
pub mod plugin;
pub mod profile;

pub use audit::run_audit;
pub use events::run_events;
pub use marketplace::{run_marketplace_add, run_marketplace_remove};
pub use plugin::{run_disable, run_enable, run_list};
pub use profile::{
    run_profile_apply, run_profile_delete, run_profile_diff, run_profile_list, run_profile_save,
    run_profile_show,
};
