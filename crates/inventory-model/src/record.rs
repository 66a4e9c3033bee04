//! Identity contract for stored values

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A value the record store can hold
///
/// The id is the sole equality key inside a store: two values with the same
/// id are the same record, whatever their other fields say. Ids are assigned
/// by whoever builds the value; the store never generates them.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Identifier type
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Stable identifier of this record
    fn id(&self) -> Self::Id;
}
