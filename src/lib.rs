//! Fractional allocation of candidates by the Consuming Veto rule.
//!
//! ```
//! use consuming_veto::model::Profile;
//! use consuming_veto::veto::{ConsumingVeto, VetoOptions};
//!
//! let profile = Profile::from_preferences(vec![
//!     vec!["a", "b", "c"],
//!     vec!["b", "c", "a"],
//!     vec!["c", "a", "b"],
//! ])
//! .unwrap();
//!
//! let outcome = ConsumingVeto::new(VetoOptions::default())
//!     .unwrap()
//!     .run(profile)
//!     .unwrap();
//! assert_eq!(outcome.shares().len(), 3);
//! ```

pub mod formats;
pub mod generate;
pub mod model;
pub mod reports;
pub mod util;
pub mod veto;
