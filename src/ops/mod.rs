//! The operator set.
//!
//! Every operator takes its configuration first and its source sequence last, so
//! that the [`pipe`](crate::pipe) module can bind the leading arguments and hand
//! back a reusable operator.

pub mod collect;
pub mod combine;
pub mod rate;
pub mod terminal;
pub mod transform;

use futures_util::future::BoxFuture;

use crate::error::SeqResult;

/// A boxed eventual result of a terminal operation
pub type Eventual<T> = BoxFuture<'static, SeqResult<T>>;

pub use collect::{collect, collect_into, collect_record, CollectOptions, Keyed};
pub use combine::{skip, take, take_until, zip, UntilEnd, ZipEnd};
pub use rate::throttle;
pub use terminal::{
    all, any, count, find, first, fold, fold_async, for_each, last, partition, to_vec,
};
pub use transform::{
    enumerate, filter, filter_async, filter_map, filter_map_async, flat_map, flatten, map,
    map_async, scan, skip_while, take_while, try_map, Indexed,
};
