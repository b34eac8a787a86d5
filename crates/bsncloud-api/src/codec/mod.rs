// Wire codecs for the BSN.cloud JSON dialect
//
// Timestamps without offsets, CSV-or-array list fields and discriminated
// sum types all need help beyond derived serde impls.

pub mod flex_list;
pub mod secret;
pub mod time;
pub mod variant;

pub use time::BsnTime;
