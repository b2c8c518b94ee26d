//! An auto-growing nested mapping with dense array and table projections.
//!
//! A [`NestedMap`] is an ordered tree of [`Node`]s: every node is either a
//! [`Scalar`] leaf or another map. Paths are written with chained
//! [`at`](NestedMap::at) calls that only create the missing levels when a
//! value is finally stored:
//!
//! ```
//! use nested_dict::{NestedMap, Scalar, TableOptions};
//!
//! let mut map = NestedMap::new();
//! for (key, value) in [("d", 4), ("e", 5), ("f", 6)] {
//!     map.at("c").at(key).set(value);
//! }
//! for (key, value) in [("d", 7), ("e", 8), ("f", 9), ("g", 10)] {
//!     map.at("v").at(key).set(value);
//! }
//!
//! // the rows have different lengths, so a fill value is required
//! assert!(map.to_array(None).is_err());
//! let labeled = map.to_labeled_array(Some(Scalar::Int(0))).unwrap();
//! assert_eq!(labeled.shape(), &[2, 4]);
//! assert_eq!(labeled.get(&["c", "g"]), Some(&Scalar::Int(0)));
//!
//! let table = map.to_wide_table(&TableOptions::default());
//! assert_eq!(table.get(&["c"], "g"), None);
//! ```

mod array;
#[cfg(feature = "serde")]
mod de;
mod error;
mod index;
mod key;
mod map;
mod node;
mod options;
mod plain;
mod scalar;
#[cfg(feature = "serde")]
mod ser;
mod slot;
mod table;
mod tabular;
mod util;

pub use array::*;
pub use error::*;
pub use index::*;
pub use key::*;
pub use map::*;
pub use node::*;
pub use options::*;
pub use plain::*;
pub use scalar::*;
pub use slot::*;
pub use table::{DEFAULT_INDEX, Table};
pub(crate) use util::*;

pub use indexmap::{IndexMap, IndexSet};
pub use ndarray::{ArrayD, IxDyn};
